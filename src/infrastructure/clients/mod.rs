pub(crate) mod jptv;
