use serde::Serialize;

use crate::model::EmployeeRecord;

pub fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Rewrites an ISO-8601 style date into `MM/DD/YY`.
///
/// This slices fixed character offsets (`YYYY-MM-DD...`) and does no calendar
/// parsing. Segments that fall outside the input come back empty.
pub fn format_birthday(date: &str) -> String {
    let segment = |from: usize, to: usize| -> String {
        date.chars().skip(from).take(to - from).collect()
    };
    let year = segment(2, 4);
    let month = segment(5, 7);
    let day = segment(8, 10);
    format!("{month}/{day}/{year}")
}

/// Summary view of a record as shown in the gallery.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Card {
    pub key: String,
    pub picture: String,
    pub name: String,
    pub email: String,
    pub location: String,
}

pub fn render_card(record: &EmployeeRecord) -> Card {
    Card {
        key: record.key().to_string(),
        picture: record.picture_url.clone(),
        name: record.name.full(),
        email: record.email.clone(),
        location: format!("{}, {}", record.address.city, record.address.state),
    }
}

impl Card {
    pub fn matches(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
    }

    pub fn to_html(&self) -> String {
        format!(
            r#"<div class="card" data-email="{key}">
    <div class="card-img-container">
        <img class="card-img" src="{picture}" alt="profile picture">
    </div>
    <div class="card-info-container">
        <h3 class="card-name cap">{name}</h3>
        <p class="card-text">{email}</p>
        <p class="card-text cap">{location}</p>
    </div>
</div>"#,
            key = escape_html(&self.key),
            picture = escape_html(&self.picture),
            name = escape_html(&self.name),
            email = escape_html(&self.email),
            location = escape_html(&self.location),
        )
    }

    pub fn to_text(&self) -> String {
        format!("{:<24} {:<36} {}", self.name, self.email, self.location)
    }
}

/// Full-detail view of a single record, shown in the modal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Detail {
    pub key: String,
    pub picture: String,
    pub name: String,
    pub email: String,
    pub city: String,
    pub phone: String,
    pub address: String,
    pub birthday: String,
}

pub fn render_detail(record: &EmployeeRecord) -> Detail {
    let a = &record.address;
    Detail {
        key: record.key().to_string(),
        picture: record.picture_url.clone(),
        name: record.name.full(),
        email: record.email.clone(),
        city: a.city.clone(),
        phone: record.phone.clone(),
        address: format!("{}, {}, {} {}", a.street, a.city, a.state, a.postal_code),
        birthday: format_birthday(&record.birth_date),
    }
}

impl Detail {
    pub fn to_html(&self) -> String {
        format!(
            r#"<div class="modal-container" data-email="{key}">
    <div class="modal">
        <button type="button" id="modal-close-btn" class="modal-close-btn" aria-label="Close"><i class="fa fa-times" aria-hidden="true"></i></button>
        <div class="modal-info-container">
            <img class="modal-img" src="{picture}" alt="profile picture">
            <h3 class="modal-name cap">{name}</h3>
            <p class="modal-text">{email}</p>
            <p class="modal-text cap">{city}</p>
            <hr>
            <p class="modal-text">{phone}</p>
            <p class="modal-text">{address}</p>
            <p class="modal-text">Birthday: {birthday}</p>
        </div>
    </div>
    <div class="modal-btn-container">
        <button type="button" id="modal-prev" class="modal-prev btn" aria-label="Previous"><i class="fa fa-chevron-left" aria-hidden="true"></i></button>
        <button type="button" id="modal-next" class="modal-next btn" aria-label="Next"><i class="fa fa-chevron-right" aria-hidden="true"></i></button>
    </div>
</div>"#,
            key = escape_html(&self.key),
            picture = escape_html(&self.picture),
            name = escape_html(&self.name),
            email = escape_html(&self.email),
            city = escape_html(&self.city),
            phone = escape_html(&self.phone),
            address = escape_html(&self.address),
            birthday = escape_html(&self.birthday),
        )
    }

    pub fn to_text(&self) -> String {
        let rows = [
            ("Name", self.name.as_str()),
            ("Email", self.email.as_str()),
            ("City", self.city.as_str()),
            ("Phone", self.phone.as_str()),
            ("Address", self.address.as_str()),
            ("Birthday", self.birthday.as_str()),
            ("Picture", self.picture.as_str()),
        ];
        let width = rows
            .iter()
            .map(|(label, value)| label.len() + value.chars().count() + 2)
            .max()
            .unwrap_or(0);
        let rule = "-".repeat(width + 4);
        let mut out = String::new();
        out.push_str(&format!("+{rule}+\n"));
        for (label, value) in rows {
            let line = format!("{label}: {value}");
            out.push_str(&format!("|  {line:<width$}  |\n"));
        }
        out.push_str(&format!("+{rule}+\n"));
        out.push_str("  [prev]  [next]  [close]\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::sample_record;

    #[test]
    fn birthday_slices_iso_timestamp() {
        assert_eq!(format_birthday("1990-07-15T00:00:00Z"), "07/15/90");
        assert_eq!(format_birthday("1948-12-03T08:14:51.093Z"), "12/03/48");
    }

    #[test]
    fn birthday_tolerates_short_input() {
        assert_eq!(format_birthday("1990"), "//90");
        assert_eq!(format_birthday(""), "//");
    }

    #[test]
    fn birthday_counts_characters_not_bytes() {
        assert_eq!(format_birthday("19é0-07-15"), "07/15/é0");
    }

    #[test]
    fn card_projects_summary_fields() {
        let card = render_card(&sample_record("Brad", "Gibson"));
        assert_eq!(card.name, "Brad Gibson");
        assert_eq!(card.email, "brad.gibson@example.com");
        assert_eq!(card.key, card.email);
        assert_eq!(card.location, "Springfield, Oregon");
    }

    #[test]
    fn card_render_is_pure() {
        let r = sample_record("Brad", "Gibson");
        assert_eq!(render_card(&r), render_card(&r));
        assert_eq!(render_card(&r).to_html(), render_card(&r).to_html());
    }

    #[test]
    fn card_matches_name_case_insensitively() {
        let card = render_card(&sample_record("Brad", "Gibson"));
        assert!(card.matches("gib"));
        assert!(card.matches(""));
        assert!(!card.matches("example"));
        assert!(!card.matches("springfield"));
    }

    #[test]
    fn detail_formats_address_and_birthday() {
        let d = render_detail(&sample_record("Brad", "Gibson"));
        assert_eq!(d.address, "1 Main St, Springfield, Oregon 97477");
        assert_eq!(d.birthday, "07/15/90");
        assert_eq!(d.city, "Springfield");
    }

    #[test]
    fn html_output_escapes_fields() {
        let mut r = sample_record("Brad", "Gibson");
        r.name.last = "<script>".to_string();
        let html = render_card(&r).to_html();
        assert!(html.contains("Brad &lt;script&gt;"));
        assert!(!html.contains("<script>"));
        let modal = render_detail(&r).to_html();
        assert!(modal.contains(r#"id="modal-next""#));
        assert!(modal.contains("Birthday: 07/15/90"));
    }

    #[test]
    fn detail_text_lists_every_field() {
        let text = render_detail(&sample_record("Brad", "Gibson")).to_text();
        assert!(text.contains("Email: brad.gibson@example.com"));
        assert!(text.contains("Birthday: 07/15/90"));
        assert!(text.contains("[next]"));
    }
}
