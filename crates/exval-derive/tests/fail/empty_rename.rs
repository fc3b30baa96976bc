#![allow(dead_code)]

use exval::Describe;

#[derive(Describe)]
struct Record {
    #[describe(rename = "")]
    id: u64,
}

fn main() {}
