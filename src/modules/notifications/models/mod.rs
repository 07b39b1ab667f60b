pub mod invoice_email;

pub use invoice_email::{render_invoice, InvoiceEmail};
