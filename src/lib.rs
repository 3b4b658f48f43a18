#![no_std]
#![cfg_attr(docs_rs, feature(doc_cfg))]
#![warn(missing_docs)]

//! A crate for DPX image data decoding.
//!
//! DPX (Digital Picture Exchange, SMPTE 268M) is a fixed-layout still image
//! container used in film scanning and post-production. This crate turns one
//! DPX frame held in memory into pixel-addressable plane data.
//!
//! * [`dpx::parse_header`] reads the parts of the header that matter for
//!   decoding.
//! * [`dpx::resolve_format`] works out the output pixel layout.
//! * [`dpx::unpack_into_planes`] writes the pixel data into planes that you
//!   provide, without allocating.
//!
//! With the `alloc` feature (on by default) you also get [`dpx::dpx_decode`]
//! and [`dpx::DpxDecoder`], which allocate the output for you.

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(target_pointer_width = "16")]
compile_error!("this crate assumes 32-bit or bigger pointers!");

mod error;
pub use error::*;

pub mod int_endian;
pub use int_endian::*;

pub mod rational;
pub use rational::*;

pub mod borrowed_planes;
pub use borrowed_planes::*;

#[cfg(feature = "alloc")]
#[cfg_attr(docs_rs, doc(cfg(feature = "alloc")))]
pub mod image;

mod parser_helpers;
pub(crate) use parser_helpers::*;

pub mod dpx;
