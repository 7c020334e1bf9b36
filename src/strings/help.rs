//! # Help Text
//!
//! Entries of the `%help` embed, in display order.
//! Displayed to the user via the `%help` command.

pub fn title(version: &str) -> String {
    format!("Help Message ({version})")
}

/// (name, value) pairs.
pub const ENTRIES: &[(&str, &str)] = &[
    (
        "`$<coin>` , `%price <coin>`, `%p <coin>`",
        "for checking cryptocurrency price",
    ),
    (
        "`%convert <amount> <crypto/fiat> <crypto/fiat>`",
        "Convert crypto->crypto, crypto->fiat, fiat->crypto. (Does not support fiat->fiat)",
    ),
    (
        "`%chart <coin>`",
        "To get cryptocurrency chart of a certain coin",
    ),
    ("`%daily`", "Get daily top 12 cryptocurrencies prices"),
    (
        "`%delegate <from> <to> <amount>` or `%delegate <to> <amount>`",
        "Delegate to a person with steemconnect",
    ),
    (
        "`%hunt <steemhunt link>` or `%sh <steemhunt link>`",
        "Get hunt post details",
    ),
    ("`%donate`", "To get details to donate to me"),
    ("`%discord`", "to join our discord!"),
    ("`%help` , `%h`", "for help"),
];
