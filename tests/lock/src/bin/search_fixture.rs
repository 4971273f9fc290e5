//! Binary that runs the canonical puzzle searches and prints deterministic
//! output lines for cross-process verification.
//!
//! Usage: `search_fixture`
//!
//! Output: key=value lines, see `lock_tests::canonical_run`.

use lock_tests::canonical_run::canonical_lines;

fn main() {
    for line in canonical_lines() {
        println!("{line}");
    }
}
