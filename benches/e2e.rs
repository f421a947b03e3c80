#![feature(test)]

extern crate test;

use test::Bencher;

use epicforge::{dice::roller::FastRand, Engine};

#[bench]
fn e2e_basic(b: &mut Bencher) {
	let engine = Engine::default();
	let mut rng = FastRand::default();
	b.iter(|| engine.evaluate("2d6+1", &mut rng).unwrap().to_string());
}

#[bench]
fn e2e_mixed(b: &mut Bencher) {
	let engine = Engine::default();
	let mut rng = FastRand::default();
	b.iter(|| engine.evaluate("2d6+1d8!-4f+3-1d100", &mut rng).unwrap().to_string());
}
