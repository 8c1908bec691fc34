/*!
 * Data Structures
 *
 * Small-string storage for process labels, colours and error messages.
 * Nearly every label in a simulation ("P1", "#3b82f6") fits inline.
 */

mod inline_string;

pub use inline_string::InlineString;
