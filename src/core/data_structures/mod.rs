/*!
 * Data Structures
 *
 * Small-string storage for addresses and diagnostic messages.
 * Simulated addresses (`0x` + 12 hex digits) always fit inline.
 */

mod inline_string;

pub use inline_string::InlineString;
