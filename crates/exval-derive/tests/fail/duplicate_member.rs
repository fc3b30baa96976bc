#![allow(dead_code)]

use exval::Describe;

#[derive(Describe)]
struct Record {
    name: String,
    #[describe(rename = "name")]
    label: String,
}

fn main() {}
