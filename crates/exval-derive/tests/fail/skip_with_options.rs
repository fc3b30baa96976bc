#![allow(dead_code)]

use exval::Describe;

#[derive(Describe)]
struct Record {
    #[describe(skip, read_only)]
    id: u64,
}

fn main() {}
