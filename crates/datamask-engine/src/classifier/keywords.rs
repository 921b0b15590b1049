//! Keyword tables used by the column classifier.
//!
//! Entries are lowercase; headers are lowercased before matching. English and
//! Malay synonyms are listed side by side.

pub const IDENTIFIER: &[&str] = &[
    "ic number",
    "ic no",
    "ic_no",
    "nric",
    "mykad",
    "no kp",
    "no. kp",
    "kad pengenalan",
    "no pengenalan",
    "national id",
    "national_id",
    "identity card",
    "identification number",
    "id number",
    "personal id",
    "personal_id",
    "passport",
    "ssn",
    "social security",
];

pub const EMAIL: &[&str] = &["email", "e-mail", "e_mail", "emel", "contact", "hubungi"];

pub const NAME: &[&str] = &[
    "name",
    "nama",
    "first name",
    "last name",
    "surname",
    "forename",
];

pub const ADDRESS: &[&str] = &["address", "alamat", "street"];

pub const PHONE: &[&str] = &["phone", "telefon"];

pub const SALARY: &[&str] = &["salary", "gaji"];

pub const AGE: &[&str] = &["age", "umur"];

pub const PLACE_OF_BIRTH: &[&str] = &[
    "place_of_birth",
    "place of birth",
    "birth place",
    "birth_place",
    "birthplace",
    "tempat lahir",
];

pub const DEPARTMENT: &[&str] = &["department", "class", "jabatan"];

pub const EXPIRATION: &[&str] = &["expir", "valid until", "valid_until", "tamat"];

pub const DATE: &[&str] = &["date", "dob", "tarikh"];
