#![allow(dead_code)]

use exval::Describe;

#[derive(Describe)]
#[describe(renam = "Account")]
struct Record {
    id: u64,
}

fn main() {}
