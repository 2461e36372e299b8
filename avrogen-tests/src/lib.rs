//! # avrogen generated-code fixtures
//!
//! Each schema under `fixtures/` is turned into a module by `build.rs` and
//! included here, so the generator's output is compiled against `serde`,
//! `serde_json`, `apache_avro` and `num_rational` on every test run.

include!(concat!(env!("OUT_DIR"), "/golden.rs"));
include!(concat!(env!("OUT_DIR"), "/linked_list.rs"));
include!(concat!(env!("OUT_DIR"), "/two_records.rs"));
include!(concat!(env!("OUT_DIR"), "/events.rs"));
