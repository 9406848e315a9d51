//! Fixed company details printed on reports and customer documents.

pub const NAME: &str = "Alibi";
pub const TAGLINE: &str = "Quest project";
pub const ADDRESS: &str = "Russia, 125009, Moscow, Kvestovaya st. 88";
pub const PHONE: &str = "+7(999) 999-99-99";
pub const EMAIL: &str = "alibi@mail.ru";

/// Legal requisites, as `(label, value)` pairs, printed on receipts.
pub const REQUISITES: [(&str, &str); 8] = [
    ("Legal address", "125009, Moscow, Kvestovaya st. 88"),
    ("TIN", "7701234567"),
    ("KPP", "770101001"),
    ("OGRN", "1234567890123"),
    ("Account", "40702810123450123456"),
    ("Bank", "PJSC \"SBERBANK\", Moscow"),
    ("BIC", "044525225"),
    ("Correspondent account", "30101810400000000225"),
];
