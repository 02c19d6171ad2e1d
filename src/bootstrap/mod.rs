//! Process bootstrap helpers used by the `egeria-ctl` binary.

pub mod logger;
