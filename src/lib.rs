#![doc = pretty_readme::docify!("README.md", "https://docs.rs/epicforge/latest/epicforge/", "./")]
#![cfg_attr(not(any(doc, test)), no_std)]
#![expect(
	clippy::tabs_in_doc_comments,
	reason = "Consistency with source, user-configurability & accessibility"
)]
#![deny(macro_use_extern_crate, meta_variable_misuse, unit_bindings)]
#![warn(
	explicit_outlives_requirements,
	missing_docs,
	missing_debug_implementations,
	unreachable_pub,
	unused_crate_dependencies,
	unused_qualifications,
	clippy::pedantic,
	clippy::absolute_paths,
	clippy::alloc_instead_of_core,
	clippy::allow_attributes,
	clippy::allow_attributes_without_reason,
	clippy::clone_on_ref_ptr,
	clippy::dbg_macro,
	clippy::exhaustive_enums,
	clippy::exhaustive_structs,
	clippy::expect_used,
	clippy::get_unwrap,
	clippy::infinite_loop,
	clippy::missing_docs_in_private_items,
	clippy::panic_in_result_fn,
	clippy::print_stderr,
	clippy::print_stdout,
	clippy::self_named_module_files,
	clippy::std_instead_of_alloc,
	clippy::std_instead_of_core,
	clippy::str_to_string,
	clippy::tests_outside_test_module,
	clippy::try_err,
	clippy::unwrap_in_result,
	clippy::unwrap_used
)]

extern crate alloc;
extern crate core;

pub mod check;
pub mod dice;
pub mod eval;
pub mod fate;
pub mod formula;
#[cfg(feature = "parse")]
pub mod parse;
pub mod session;

pub use eval::{Engine, Evaluation};
pub use formula::Formula;
#[cfg(feature = "parse")]
pub use parse::formula as parser;

#[cfg(test)]
mod tests;

#[cfg(feature = "build-binary")]
use ariadne as _;
#[cfg(feature = "build-binary")]
use clap as _;
#[cfg(feature = "build-binary")]
use tracing_subscriber as _;

/// Evaluates a formula with the default [`Engine`] and a fresh [fastrand] roller.
///
/// # Errors
/// If the formula is malformed, [`parse::Error::InvalidFormula`] is returned.
///
/// # Examples
/// ```
/// let evaled = epicforge::evaluate("2d6+1")?;
/// assert!((3..=13).contains(&evaled.total));
/// assert_eq!(evaled.terms.len(), 2);
/// assert_eq!(evaled.fate_label, None);
/// # Ok::<(), epicforge::parse::Error>(())
/// ```
#[cfg(all(feature = "parse", feature = "fastrand", feature = "std"))]
pub fn evaluate(formula: &str) -> Result<Evaluation, parse::Error> {
	Engine::default().evaluate(formula, &mut dice::roller::FastRand::default())
}
