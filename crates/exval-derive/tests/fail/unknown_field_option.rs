#![allow(dead_code)]

use exval::Describe;

#[derive(Describe)]
struct Record {
    #[describe(read_onyl)]
    id: u64,
}

fn main() {}
