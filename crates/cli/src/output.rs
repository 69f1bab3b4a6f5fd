//! Plain-text rendering of a settled action.

use std::fmt::Write as _;

use wishlist_console::{ItemForm, ResultTable, Settled, WishlistForm};

use crate::CliError;

/// Labelled fields of a form, in display order.
pub trait FormFields {
    fn fields(&self) -> Vec<(&'static str, &str)>;
}

impl FormFields for WishlistForm {
    fn fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("ID", self.id.as_str()),
            ("Customer ID", self.customer_id.as_str()),
            ("Name", self.name.as_str()),
            ("Created", self.created_date.as_str()),
            ("Modified", self.modified_date.as_str()),
        ]
    }
}

impl FormFields for ItemForm {
    fn fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("ID", self.id.as_str()),
            ("Wishlist ID", self.wishlist_id.as_str()),
            ("Product ID", self.product_id.as_str()),
            ("Price", self.price.as_str()),
            ("Description", self.description.as_str()),
            ("Added", self.added_date.as_str()),
            ("Modified", self.modified_date.as_str()),
        ]
    }
}

/// Render the notification, the non-empty form fields and the table.
pub fn render(settled: &Settled, form: &impl FormFields, results: &ResultTable) -> String {
    let mut out = String::new();

    match settled.notification() {
        Some(notification) if notification.is_error() => {
            let _ = writeln!(out, "error: {notification}");
        }
        Some(notification) => {
            let _ = writeln!(out, "{notification}");
        }
        None => {}
    }

    let fields = form.fields();
    let width = fields.iter().map(|(label, _)| label.len()).max().unwrap_or_default();
    let filled: Vec<_> = fields.iter().filter(|(_, value)| !value.is_empty()).collect();
    if !filled.is_empty() {
        out.push('\n');
        for (label, value) in filled {
            let _ = writeln!(out, "{label:<width$}  {value}");
        }
    }

    if results.is_displayed() {
        out.push('\n');
        out.push_str(&results.render_text());
        let _ = writeln!(out, "({} rows)", results.len());
    }

    out
}

/// Print the outcome and turn an error notification into a failure.
#[allow(clippy::print_stdout)]
pub fn finish(
    settled: &Settled,
    form: &impl FormFields,
    results: &ResultTable,
) -> Result<(), CliError> {
    print!("{}", render(settled, form, results));

    match settled.notification() {
        Some(notification) if notification.is_error() => {
            Err(CliError::Action(notification.message.clone()))
        }
        _ => Ok(()),
    }
}
