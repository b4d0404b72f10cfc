//! Integration tests for svnline.
//! Each test:
//! - sets up a temporary working copy directory and a fake `svn` script
//! - runs some queries against it
//! - asserts the results, and which `svn` invocations were made
//! - cleans up the temporary directories
//!
//! It is useful when debugging to sometimes manually inspect a test-case.
//! ```rust`
//! dbg!(&ctx.svn.calls());
//! ctx.dir.leak();
//! ````
//!

mod helpers;
mod status;

use helpers::TestContext;
