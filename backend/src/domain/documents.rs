//! Waiver statements and payment receipts rendered as plain text.

use chrono::{NaiveDate, NaiveDateTime};

use super::{Download, Error, business};

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Map every character other than alphanumerics, `-` and `_` to `_`.
///
/// ```
/// use quest_backend::domain::sanitise_filename;
///
/// assert_eq!(sanitise_filename("Manor: part 2/3"), "Manor__part_2_3");
/// ```
#[must_use]
pub fn sanitise_filename(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn required(field: &str, value: &str) -> Result<String, Error> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::invalid_request(format!("{field} must not be empty"))
            .with_details(serde_json::json!({ "field": field })));
    }
    Ok(trimmed.to_owned())
}

/// Input of the participation waiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementRequest {
    full_name: String,
    passport_series: String,
    passport_number: String,
    quest_title: String,
}

impl StatementRequest {
    /// Every field is required and trimmed.
    pub fn new(
        full_name: &str,
        passport_series: &str,
        passport_number: &str,
        quest_title: &str,
    ) -> Result<Self, Error> {
        Ok(Self {
            full_name: required("fullName", full_name)?,
            passport_series: required("passportSeries", passport_series)?,
            passport_number: required("passportNumber", passport_number)?,
            quest_title: required("questTitle", quest_title)?,
        })
    }

    /// Render the waiver dated `today`.
    #[must_use]
    pub fn render(&self, today: NaiveDate) -> Download {
        let body = format!(
            "Waiver of claims\n\
             \n\
             I, {full_name},\n\
             (full name)\n\
             \n\
             passport series {series} number {number},\n\
             \n\
             being a registered user of the \"{business}\" quest booking system and aware of \
             the risks of taking part in quests with actors, voluntarily decide to take part \
             in the quest \"{quest}\".\n\
             \n\
             I fully understand and voluntarily accept the risks related to:\n\
             - psychological pressure and elements of fear during the quest;\n\
             - physical activity and movement in confined spaces;\n\
             - interaction with actors and improvised parts of the programme;\n\
             - rooms with special effects (light, sound, smoke and others).\n\
             \n\
             I confirm that:\n\
             - I have no medical contraindications to active games;\n\
             - I do not suffer from cardiovascular diseases;\n\
             - I have no mental disorders;\n\
             - I am not under the influence of alcohol or drugs;\n\
             - I have been told that photos and video may be taken during the quest.\n\
             \n\
             I have read and accept the terms of participation.\n\
             \n\
             Participant: _________________________\n\
             \n\
             (signature)\n\
             \n\
             Date: {date}.\n",
            full_name = self.full_name,
            series = self.passport_series,
            number = self.passport_number,
            business = business::NAME,
            quest = self.quest_title,
            date = today.format("%d.%m.%Y"),
        );
        Download {
            filename: format!("statement_{}.txt", sanitise_filename(&self.quest_title)),
            content_type: TEXT_PLAIN,
            bytes: body.into_bytes(),
        }
    }
}

/// Input of the payment receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptRequest {
    quest_title: String,
    quest_price: i64,
}

impl ReceiptRequest {
    pub fn new(quest_title: &str, quest_price: i64) -> Result<Self, Error> {
        if quest_price < 0 {
            return Err(Error::invalid_request("questPrice must not be negative")
                .with_details(serde_json::json!({ "field": "questPrice" })));
        }
        Ok(Self {
            quest_title: required("questTitle", quest_title)?,
            quest_price,
        })
    }

    /// Render the receipt issued to `customer` at `issued_at`.
    #[must_use]
    pub fn render(&self, customer: &str, issued_at: NaiveDateTime) -> Download {
        let requisites: String = business::REQUISITES
            .iter()
            .map(|(label, value)| format!("{label}: {value}\n"))
            .collect();
        let body = format!(
            "{name}\n\
             {tagline}\n\
             \n\
             {requisites}\
             {rule}\n\
             CASH RECEIPT\n\
             \n\
             Order: {quest}\n\
             Date: {date}\n\
             Customer: {customer}\n\
             \n\
             Amount: {price} RUB\n\
             \n\
             Including VAT 20%: -\n\
             Simplified taxation system\n",
            name = business::NAME,
            tagline = business::TAGLINE,
            rule = "-".repeat(48),
            quest = self.quest_title,
            date = issued_at.format("%d.%m.%Y %H:%M"),
            price = self.quest_price,
        );
        Download {
            filename: format!("receipt_{}.txt", sanitise_filename(&self.quest_title)),
            content_type: TEXT_PLAIN,
            bytes: body.into_bytes(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn text(download: &Download) -> &str {
        std::str::from_utf8(&download.bytes).expect("utf-8 body")
    }

    #[rstest]
    fn statement_fills_placeholders() {
        let request =
            StatementRequest::new("Alice Smith", "4510", "123456", "The Manor").expect("valid");
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).expect("date");
        let download = request.render(today);
        let body = text(&download);
        assert!(body.contains("I, Alice Smith,"));
        assert!(body.contains("passport series 4510 number 123456"));
        assert!(body.contains("\"The Manor\""));
        assert!(body.contains("Date: 01.06.2025."));
        assert_eq!(download.filename, "statement_The_Manor.txt");
        assert_eq!(download.content_type, TEXT_PLAIN);
    }

    #[rstest]
    #[case("", "4510", "123456", "Manor", "fullName")]
    #[case("Alice", " ", "123456", "Manor", "passportSeries")]
    #[case("Alice", "4510", "", "Manor", "passportNumber")]
    #[case("Alice", "4510", "123456", "\t", "questTitle")]
    fn statement_requires_every_field(
        #[case] name: &str,
        #[case] series: &str,
        #[case] number: &str,
        #[case] title: &str,
        #[case] field: &str,
    ) {
        let err = StatementRequest::new(name, series, number, title).expect_err("missing field");
        assert_eq!(err.details(), Some(&serde_json::json!({ "field": field })));
    }

    #[rstest]
    fn receipt_lists_requisites_and_amount() {
        let request = ReceiptRequest::new("Manor", 2500).expect("valid");
        let issued_at = NaiveDate::from_ymd_opt(2025, 6, 1)
            .and_then(|d| d.and_hms_opt(18, 30, 0))
            .expect("timestamp");
        let download = request.render("alice", issued_at);
        let body = text(&download);
        assert!(body.contains("TIN: 7701234567"));
        assert!(body.contains("Order: Manor"));
        assert!(body.contains("Date: 01.06.2025 18:30"));
        assert!(body.contains("Customer: alice"));
        assert!(body.contains("Amount: 2500 RUB"));
        assert_eq!(download.filename, "receipt_Manor.txt");
    }

    #[rstest]
    fn receipt_rejects_negative_price() {
        assert!(ReceiptRequest::new("Manor", -1).is_err());
    }

    #[rstest]
    #[case("Manor", "Manor")]
    #[case("Дом с привидениями", "Дом_с_привидениями")]
    #[case("../etc/passwd", "___etc_passwd")]
    fn sanitising_keeps_word_characters(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(sanitise_filename(raw), expected);
    }
}
