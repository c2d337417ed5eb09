/// End-to-end stream tests across every variant and delay combination.
pub mod stream;
