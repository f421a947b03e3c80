#![feature(test)]

extern crate test;

use chumsky::Parser;
use epicforge::formula::Formula;
use test::Bencher;

#[bench]
fn parse_basic(b: &mut Bencher) {
	let parser = epicforge::parser();
	b.iter(|| parser.parse("2d6+1").unwrap());
}

#[bench]
fn parse_mixed(b: &mut Bencher) {
	let parser = epicforge::parser();
	b.iter(|| parser.parse("2d6+1d8!-4f+3-1d100").unwrap());
}

#[bench]
fn parser_creation(b: &mut Bencher) {
	b.iter(epicforge::parser);
}

#[bench]
fn fromstr_basic(b: &mut Bencher) {
	b.iter(|| "2d6 + 1".parse::<Formula>().unwrap());
}

#[bench]
fn fromstr_rejected(b: &mut Bencher) {
	b.iter(|| "2d6 + 1x8".parse::<Formula>().unwrap_err());
}
