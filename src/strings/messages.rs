//! # Messages
//!
//! Contains constant strings and format functions for user-facing messages.
//! Includes canned routing errors, static command replies and handler error texts.

pub const UNKNOWN_COMMAND: &str = "Invalid command, Try `%help` to get started";

pub fn invalid_command(usage: &str) -> String {
    format!("Invalid command, try {usage}")
}

pub const COMMAND_FAILED: &str = "Something went wrong, please try again later.";
pub const COMMAND_TIMED_OUT: &str = "The request took too long, please try again later.";

// Usage strings, shown after "Invalid command, try ".
pub const PRICE_USAGE: &str = "`%price <coin>`";
pub const CHART_USAGE: &str = "`%chart <coin>`";
pub const CONVERT_USAGE: &str = "`%convert <amount> <crypto/fiat> <crypto/fiat>`";
pub const DELEGATE_USAGE: &str = "`%delegate <from> <to> <no of sp>`";
pub const HUNT_USAGE: &str = "`%hunt <steemhunt link>`";

// Static replies
pub fn pong(bot_name: Option<&str>) -> String {
    match bot_name {
        Some(name) => format!("Pong! {name} is online."),
        None => "Pong!".to_string(),
    }
}

pub fn session_age(secs: i64) -> String {
    format!("Session refreshed {secs}s ago")
}

pub const DISCORD_TITLE: &str = "Join our discord channel";
pub const DISCORD_INVITE: &str = "https://discord.gg/J99vTUS";
pub const BUG_TITLE: &str = "Found a bug?";
pub const BUG_REPORT: &str = "Report bugs at https://github.com/superoo7/statbot2/issues";

pub const DONATE_TITLE: &str = "Donation to make this project sustainable";
pub const DONATE_FIELDS: &[(&str, &str)] = &[
    (
        "I accept following cryptocurrencies, feel free to donate.",
        "can drop me an email or discord message after you had done.",
    ),
    ("Steem", "[@superoo7](https://steemitwallet.com/@superoo7)"),
    (
        "Ethereum/Hunt-Token/ERC20 tokens",
        "[superoo7.eth](https://etherscan.io/address/superoo7.eth) (ENS Address) or [0xfCAD3475520fb54Fc95305A6549A79170DA8B7C0](https://etherscan.io/address/0xfCAD3475520fb54Fc95305A6549A79170DA8B7C0)",
    ),
    (
        "Bitcoin",
        "[3QvrngBgkwT7x1ybUcLNSCPZrooiErVgfZ](https://www.blockchain.com/btc/address/3QvrngBgkwT7x1ybUcLNSCPZrooiErVgfZ)",
    ),
];

// Embed field names
pub const FIELD_PRICE: &str = "Price";
pub const FIELD_CHANGE_24H: &str = "24h Change";
pub const FIELD_MARKET_CAP: &str = "Market Cap";
pub const FIELD_VOLUME_24H: &str = "24h Volume";
pub const FIELD_RANK: &str = "Rank";
pub const FIELD_LOW: &str = "Low";
pub const FIELD_HIGH: &str = "High";
pub const FIELD_CHANGE: &str = "Change";
pub const FIELD_BALANCE: &str = "Balance";
pub const FIELD_SBD_BALANCE: &str = "SBD Balance";
pub const FIELD_VESTING: &str = "Vesting Shares";
pub const FIELD_REPUTATION: &str = "Reputation";
pub const FIELD_POSTS: &str = "Posts";
pub const FIELD_AUTHOR: &str = "Author";
pub const FIELD_VOTES: &str = "Votes";
pub const FIELD_COMMENTS: &str = "Comments";
pub const FIELD_PAYOUT: &str = "Pending Payout";
pub const FIELD_CREATED: &str = "Created";

// Market
pub fn coin_not_found(symbol: &str) -> String {
    format!("Coin {symbol} not found")
}

pub fn quote_title(name: &str, symbol: &str) -> String {
    format!("{name} ({})", symbol.to_uppercase())
}

pub fn chart_title(name: &str, symbol: &str, days: u32) -> String {
    format!("{name} ({}) last {days} days", symbol.to_uppercase())
}

pub const CHART_NO_DATA: &str = "No price history available for this coin";

pub fn priced(price: &str, vs_currency: &str) -> String {
    format!("{price} {}", vs_currency.to_uppercase())
}

pub fn daily_entry_name(rank: Option<u32>, name: &str, symbol: &str) -> String {
    match rank {
        Some(rank) => format!("{rank}. {name} ({})", symbol.to_uppercase()),
        None => format!("{name} ({})", symbol.to_uppercase()),
    }
}

pub fn daily_entry_value(price: &str, change: &str) -> String {
    format!("${price} ({change})")
}

pub fn daily_title(count: usize) -> String {
    format!("Top {count} cryptocurrencies today")
}

pub fn invalid_amount(amount: &str) -> String {
    format!("Invalid amount `{amount}`, it should be a positive number")
}

pub const FIAT_TO_FIAT: &str = "Fiat to fiat conversion is not supported";

pub fn conversion_result(amount: &str, from: &str, result: &str, to: &str) -> String {
    format!(
        "{amount} {} = {result} {}",
        from.to_uppercase(),
        to.to_uppercase()
    )
}

// Steem
pub fn account_not_found(name: &str) -> String {
    format!("Steem account @{name} not found")
}

pub fn account_title(name: &str) -> String {
    format!("@{name}")
}

pub fn profile_link(name: &str) -> String {
    format!("https://steemit.com/@{name}")
}

pub fn delegate_title(amount: &str, to: &str) -> String {
    format!("Delegate {amount} SP to @{to}")
}

pub const DELEGATE_LINK_NAME: &str = "Sign the delegation with SteemConnect";

pub fn hunt_link(author: &str, permlink: &str) -> String {
    format!("https://steemhunt.com/@{author}/{permlink}")
}

pub const INVALID_HUNT_LINK: &str =
    "Invalid steemhunt link, it should look like https://steemhunt.com/@author/permlink";

pub fn post_not_found(author: &str, permlink: &str) -> String {
    format!("Post @{author}/{permlink} not found")
}
