pub mod selftest;
pub mod sync;
