use serde::Serialize;

use crate::models::{PremiereDetails, Reservation};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailTemplate {
    pub subject: String,
    pub html_body: String,
}

/// Escapes the five characters that can break out of HTML text or attribute
/// context.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn organizer_notification(reservation: &Reservation) -> EmailTemplate {
    let name = escape_html(&reservation.name);
    let email = escape_html(&reservation.email);

    let phone_line = reservation
        .phone
        .as_deref()
        .map(|phone| format!("<p><strong>Telefon:</strong> {}</p>", escape_html(phone)))
        .unwrap_or_default();

    let message_block = reservation
        .message
        .as_deref()
        .map(|message| {
            format!(
                "<p><strong>Nachricht:</strong></p><p>{}</p>",
                escape_html(message).replace('\n', "<br>")
            )
        })
        .unwrap_or_default();

    let html_body = format!(
        r#"
      <h2>Neue Ticket-Reservierung</h2>
      <p><strong>Name:</strong> {name}</p>
      <p><strong>Email:</strong> <a href="mailto:{email}">{email}</a></p>
      <p><strong>Anzahl Tickets:</strong> {tickets}</p>
      {phone_line}
      {message_block}
      <hr>
      <p><em>Diese Nachricht wurde über die Website-Ticketreservierung gesendet</em></p>
    "#,
        name = name,
        email = email,
        tickets = reservation.tickets,
        phone_line = phone_line,
        message_block = message_block,
    );

    EmailTemplate {
        subject: format!(
            "Neue Ticket-Reservierung: {} ({} Tickets)",
            reservation.name, reservation.tickets
        ),
        html_body,
    }
}

pub fn visitor_confirmation(reservation: &Reservation, premiere: &PremiereDetails) -> EmailTemplate {
    let html_body = format!(
        r#"
      <h2>Vielen Dank für deine Ticket-Reservierung!</h2>
      <p>Hallo {name},</p>
      <p>wir haben deine Reservierung für <strong>{tickets} Ticket(s)</strong> zur Kinopremiere erhalten. Du wirst bald von uns kontaktiert.</p>

      <h3>Premiere-Details:</h3>
      <ul>
        <li><strong>Datum:</strong> {date}</li>
        <li><strong>Uhrzeit:</strong> {time}</li>
        <li><strong>Ort:</strong> {venue}</li>
        <li><strong>Eintritt:</strong> {admission}</li>
      </ul>

      <p>Viele Grüße,<br>
      Das Team von "{film}"<br>
      <a href="{website_url}">{website}</a></p>
    "#,
        name = escape_html(&reservation.name),
        tickets = reservation.tickets,
        date = premiere.date,
        time = premiere.time,
        venue = premiere.venue,
        admission = premiere.admission,
        film = premiere.film_title,
        website_url = premiere.website_url(),
        website = premiere.website,
    );

    EmailTemplate {
        subject: format!("Ticket-Reservierung erhalten - {}", premiere.film_title),
        html_body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reservation() -> Reservation {
        Reservation {
            name: "Ana".to_string(),
            email: "ana@x.de".to_string(),
            tickets: 3,
            phone: None,
            message: None,
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#039;Jerry&#039;&lt;/a&gt;"
        );
        assert_eq!(escape_html("Grüße"), "Grüße");
        assert_eq!(escape_html(""), "");
    }

    #[test]
    fn test_organizer_notification_contents() {
        let template = organizer_notification(&reservation());

        assert_eq!(template.subject, "Neue Ticket-Reservierung: Ana (3 Tickets)");
        assert!(template.html_body.contains("<strong>Name:</strong> Ana"));
        assert!(template.html_body.contains(r#"<a href="mailto:ana@x.de">ana@x.de</a>"#));
        assert!(template.html_body.contains("<strong>Anzahl Tickets:</strong> 3"));
        assert!(!template.html_body.contains("Telefon"));
        assert!(!template.html_body.contains("Nachricht"));
    }

    #[test]
    fn test_organizer_notification_optional_fields() {
        let template = organizer_notification(&Reservation {
            phone: Some("0351 123456".to_string()),
            message: Some("Erste Zeile\nZweite Zeile".to_string()),
            ..reservation()
        });

        assert!(template.html_body.contains("<strong>Telefon:</strong> 0351 123456"));
        assert!(template.html_body.contains("<p>Erste Zeile<br>Zweite Zeile</p>"));
    }

    #[test]
    fn test_markup_in_fields_is_escaped() {
        let hostile = Reservation {
            name: "<b>Ana</b>".to_string(),
            message: Some("<script>alert(1)</script>".to_string()),
            ..reservation()
        };

        let organizer = organizer_notification(&hostile);
        let visitor = visitor_confirmation(&hostile, &PremiereDetails::screening());

        for body in [&organizer.html_body, &visitor.html_body] {
            assert!(!body.contains("<script>"));
            assert!(!body.contains("<b>Ana</b>"));
            assert!(body.contains("&lt;b&gt;Ana&lt;/b&gt;"));
        }
        assert!(organizer
            .html_body
            .contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn test_visitor_confirmation_contents() {
        let premiere = PremiereDetails::screening();
        let template = visitor_confirmation(&reservation(), &premiere);

        assert_eq!(
            template.subject,
            "Ticket-Reservierung erhalten - Das Ende vom Tellerrand"
        );
        assert!(template.html_body.contains("Hallo Ana,"));
        assert!(template.html_body.contains("<strong>3 Ticket(s)</strong>"));
        assert!(template.html_body.contains("20. Februar 2026"));
        assert!(template.html_body.contains("19:30 Uhr"));
        assert!(template.html_body.contains(premiere.venue));
        assert!(template
            .html_body
            .contains(r#"<a href="https://www.herrlehmanns-weltreise.de">"#));
    }
}
