use crate::modules::bookings::models::Booking;

/// Rendered invoice message
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceEmail {
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// Render the invoice sent when a booking is created
pub fn render_invoice(booking: &Booking, service_name: &str) -> InvoiceEmail {
    let service_name = if service_name.trim().is_empty() {
        booking.service_name.as_str()
    } else {
        service_name
    };
    let customer_name = if booking.customer.name.trim().is_empty() {
        "there"
    } else {
        booking.customer.name.as_str()
    };

    let duration = booking.duration_unit.describe(booking.duration_value);
    let rate = booking.currency.format_amount(booking.per_unit_rate);
    let total = booking.currency.format_amount(booking.total_cost);
    let unit = booking.duration_unit.as_str();
    let location = non_empty_or_dash(booking.location.summary());
    let address = non_empty_or_dash(booking.location.address.trim().to_string());

    let subject = format!(
        "Booking invoice – {} (Ref: {})",
        service_name,
        booking.short_ref()
    );

    let text = format!(
        "Thank you for your booking, {customer}.\n\n\
         Service: {service}\n\
         Booking ID: {id}\n\
         Status: {status}\n\n\
         Duration: {duration}\n\
         Rate: {rate} per {unit}\n\
         Estimated total: {total}\n\n\
         Location:\n  {location}\n  {address}\n\n\
         You can view and manage this booking from the \"My Bookings\" section in NestCare.\n",
        customer = customer_name,
        service = service_name,
        id = booking.id,
        status = booking.status,
        duration = duration,
        rate = rate,
        unit = unit,
        total = total,
        location = location,
        address = address,
    );

    let html = format!(
        r#"<div style="font-family: system-ui, sans-serif; color: #111827; font-size: 14px; line-height: 1.5;">
  <h2 style="margin-bottom: 4px;">Thank you for your booking, {customer}.</h2>
  <p style="margin-top: 0; color: #6B7280;">Here is your NestCare booking summary and invoice.</p>
  <div style="margin-top: 16px; padding: 12px 14px; border-radius: 12px; border: 1px solid #E5E7EB; background: #F9FAFB;">
    <h3 style="margin: 0 0 8px; font-size: 15px;">Booking details</h3>
    <p style="margin: 0;">
      <strong>Service:</strong> {service}<br/>
      <strong>Booking ID:</strong> <span style="font-family: monospace; font-size: 12px;">{id}</span><br/>
      <strong>Status:</strong> {status}
    </p>
  </div>
  <div style="margin-top: 16px; padding: 12px 14px; border-radius: 12px; border: 1px solid #E5E7EB;">
    <h3 style="margin: 0 0 8px; font-size: 15px;">Time &amp; pricing</h3>
    <p style="margin: 0;">
      <strong>Duration:</strong> {duration}<br/>
      <strong>Rate:</strong> {rate} per {unit}<br/>
      <strong>Estimated total:</strong> {total}
    </p>
  </div>
  <div style="margin-top: 16px; padding: 12px 14px; border-radius: 12px; border: 1px solid #E5E7EB;">
    <h3 style="margin: 0 0 8px; font-size: 15px;">Location</h3>
    <p style="margin: 0;">
      <strong>Area:</strong> {location}<br/>
      <strong>Address:</strong> {address}
    </p>
  </div>
  <p style="margin-top: 20px; color: #6B7280; font-size: 12px;">
    You can view and manage this booking any time from the <strong>My Bookings</strong> section inside NestCare.
  </p>
  <p style="margin-top: 8px; color: #9CA3AF; font-size: 11px;">
    This email was generated automatically by NestCare. If you did not make this booking, please contact support.
  </p>
</div>
"#,
        customer = escape_html(customer_name),
        service = escape_html(service_name),
        id = escape_html(&booking.id),
        status = booking.status,
        duration = escape_html(&duration),
        rate = escape_html(&rate),
        unit = unit,
        total = escape_html(&total),
        location = escape_html(&location),
        address = escape_html(&address),
    );

    InvoiceEmail {
        subject,
        text,
        html,
    }
}

fn non_empty_or_dash(value: String) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value
    }
}

/// Escape `&`, `<` and `>` for HTML text content
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
