//! Notification email templates
//!
//! Each function renders a (subject, html body) pair for one notification
//! kind. Values are HTML-escaped before interpolation.

use crate::db::models::{BookingSubmission, Product};

/// Minimal HTML escaping for interpolated user input
fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Wish-list send: summary of the snapshotted items
pub fn wish_list_sent(username: &str, products: &[Product]) -> (String, String) {
    let subject = format!("Product List from {username}");
    let items: String = products
        .iter()
        .map(|p| {
            format!(
                "<li>{} - {} {}</li>",
                escape(&p.name),
                escape(&p.brand),
                escape(p.model.as_deref().unwrap_or(""))
            )
        })
        .collect();
    let html = format!(
        "<h2>Product List Request</h2>\
         <p><strong>User:</strong> {}</p>\
         <p><strong>Products:</strong></p>\
         <ul>{items}</ul>",
        escape(username)
    );
    (subject, html)
}

/// Booking form submission
pub fn booking_received(submission: &BookingSubmission) -> (String, String) {
    let subject = format!("Booking Request from {}", submission.sender_name);
    let html = format!(
        "<h2>New Booking Request</h2>\
         <p><strong>Name:</strong> {}</p>\
         <p><strong>Email:</strong> {}</p>\
         <p><strong>Phone:</strong> {}</p>\
         <p><strong>Company:</strong> {}</p>\
         <p><strong>Booking Details:</strong></p>\
         <p>{}</p>",
        escape(&submission.sender_name),
        escape(&submission.email),
        escape(&submission.phone),
        escape(submission.company_name.as_deref().unwrap_or("N/A")),
        escape(&submission.details)
    );
    (subject, html)
}

/// General inquiry form submission
pub fn inquiry_received(name: &str, email: &str, topic: &str, description: &str) -> (String, String) {
    let subject = format!("General Inquiry: {topic}");
    let html = format!(
        "<h2>General Inquiry</h2>\
         <p><strong>Name:</strong> {}</p>\
         <p><strong>Email:</strong> {}</p>\
         <p><strong>Topic:</strong> {}</p>\
         <p><strong>Description:</strong></p>\
         <p>{}</p>",
        escape(name),
        escape(email),
        escape(topic),
        escape(description)
    );
    (subject, html)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, brand: &str, model: &str) -> Product {
        Product {
            id: 1,
            name: name.to_string(),
            brand: brand.to_string(),
            series: None,
            model: Some(model.to_string()),
            serial_number: None,
            description: None,
            image: None,
            dealer_price: None,
            end_user_price: None,
            warranty: None,
            product_type: None,
            created_at: 0,
        }
    }

    #[test]
    fn test_wish_list_template_lists_items() {
        let products = vec![
            product("LaserJet", "HP", "M404dn"),
            product("Pixma", "Canon", "TS3350"),
        ];
        let (subject, html) = wish_list_sent("alice", &products);
        assert_eq!(subject, "Product List from alice");
        assert!(html.contains("<li>LaserJet - HP M404dn</li>"));
        assert!(html.contains("<li>Pixma - Canon TS3350</li>"));
    }

    #[test]
    fn test_templates_escape_html() {
        let (_, html) = inquiry_received("<script>", "a@b.c", "topic", "desc");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_booking_template_defaults_company() {
        let submission = BookingSubmission {
            email: "a@b.c".into(),
            phone: "555".into(),
            company_name: None,
            sender_name: "Sender".into(),
            details: "Details".into(),
            role: None,
        };
        let (subject, html) = booking_received(&submission);
        assert_eq!(subject, "Booking Request from Sender");
        assert!(html.contains("<strong>Company:</strong> N/A"));
    }
}
