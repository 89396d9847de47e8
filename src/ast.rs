//! # SimpleQL - Abstract Syntax Tree
//!
//! This module defines the tree produced by the SimpleQL parser. A SimpleQL
//! document describes how output fields are sourced from named data
//! providers, with optional parameters, indexed references and chained
//! post-processing operators.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Structural tokens produced by the lexer
//! - **[tree]** - Statements ([`AstTree`]) and their right-hand side ([`Source`])
//! - **[types]** - Type references, keyed parameters and processor pipelines
//!
//! ## Quick Start
//!
//! ```text
//! $root: Member {
//!   honourMember: member,
//!   payerStatus,
//! },
//! clause: Fengdie(path: insmutual_clause, base: $foo) | Trim
//! ```
//!
//! Parses into two root statements. The first maps `member` onto
//! `honourMember` and passes `payerStatus` through, both scoped to the
//! `Member` provider. The second reads from the `Fengdie` provider with two
//! keyed parameters and runs the result through the `Trim` processor.
//!
//! ## Core Concepts
//!
//! ### Field mapping vs type reference
//!
//! The right-hand side of `name: value` is a **field mapping** when `value`
//! starts with a character sorting after lowercase `a`, otherwise it is a
//! **type reference**. Note that this means `name: abc` is a type reference.
//!
//! ### Parameter values
//!
//! Values are either plain text, quoted literals (kept with their quotes),
//! or a one-level indexed reference such as `$foo[$$bar.baz]`.
pub mod tokens;
pub mod tree;
pub mod types;

pub use tokens::Token;
pub use tree::{AstTree, Source};
pub use types::{Param, ParamValue, ProcessorCall, TypeSpec};
