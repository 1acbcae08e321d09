//! The LRS `about` resource.

use crate::extensions::Extensions;

/// What an LRS reports about itself: the protocol versions it accepts,
/// plus any vendor extensions.
///
/// Versions stay as strings — an LRS may advertise revisions this crate
/// does not model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct About {
  pub version:    Vec<String>,
  pub extensions: Option<Extensions>,
}
