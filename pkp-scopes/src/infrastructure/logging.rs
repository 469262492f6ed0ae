//! Utilities for our logging (tracing) infrastructure.

use std::fmt::Debug;
use tracing::{warn, Span};

/// For the current active span, record `field_value` for the field
/// `field_name`. This field must already be declared on the current span,
/// usually as `field_name = tracing::field::Empty`.
///
/// All events that happen inside this span will have these fields attached as
/// additional data. For example, the lookup span declares `auth_method_type`
/// and `auth_id` up front and fills them in once the credential is resolved:
/// ```text
///   INFO pkp_scopes_client::lookup: Found token ids. count=2
///     in pkp_scopes_client::lookup::fetch_pkps with auth_method_type: "EthWallet (1)", auth_id: "0x8a1f..."
/// ```
///
/// In debug builds, this function logs a warning if the field has NOT been
/// declared.
pub fn record_field(field_name: &str, field_value: &dyn Debug) {
    if cfg!(debug_assertions) && !Span::current().has_field(field_name) {
        warn!("Field {} not defined in current span!", field_name);
    }

    // Ignore the resulting span.
    let _ = Span::current().record(field_name, format!("{field_value:?}").as_str());
}
