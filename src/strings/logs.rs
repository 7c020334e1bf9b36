pub const CONFIG_PARSE_ERROR: &str = "Failed to parse YAML";

pub const EMPTY_WHITELIST: &str = "Channel whitelist is empty, the bot will not answer anywhere";

pub fn starting(version: &str, mode: &str) -> String {
    format!("Starting Statbot {version} ({mode})...")
}

pub fn bot_ready(name: &str, guilds: usize) -> String {
    format!("Bot is running as {name} in {guilds} guild(s).")
}

pub const PRESS_CTRL_C: &str = "Press CTRL-C to exit.";
pub const SHUTDOWN: &str = "Shutting down...";

pub fn shutdown_fail(err: &str) -> String {
    format!("Unable to listen for shutdown signal: {err}")
}

pub fn drained(embeds: usize, embed_failures: usize, texts: usize, text_failures: usize) -> String {
    format!(
        "Outbox drained: {embeds} embed(s) ({embed_failures} failed), {texts} text(s) ({text_failures} failed)"
    )
}

pub fn dispatching(command: &str, args: &[String], channel: u64, author: u64) -> String {
    format!("Dispatching cmd='{command}' args={args:?} channel={channel} author={author}")
}

pub fn event_ignored(reason: &str) -> String {
    format!("Ignored message: {reason}")
}

pub fn missing_arguments(command: &str, given: usize, usage: &str) -> String {
    format!("Command '{command}' got {given} argument(s), usage {usage}")
}

pub fn handler_aborted(err: &str) -> String {
    format!("Command task ended abnormally: {err}")
}

pub fn queue_state(kind: &str, state: &str) -> String {
    format!("{kind} queue is {state}")
}

pub fn dispatch_failed(err: &str) -> String {
    format!("Failed to dispatch message: {err}")
}

pub fn handler_failed(command: &str, err: &str) -> String {
    format!("Command '{command}' failed: {err}")
}

pub fn handler_timed_out(command: &str, after: std::time::Duration) -> String {
    format!("Command '{command}' timed out after {}s", after.as_secs())
}

pub fn queue_closed(kind: &str) -> String {
    format!("The {kind} queue is closed")
}

pub fn send_failed(kind: &str, channel: u64, err: &str) -> String {
    format!("Failed to deliver {kind} message to channel {channel}: {err}")
}

pub fn worker_started(kind: &str) -> String {
    format!("{kind} dispatcher started")
}

pub fn worker_stopped(kind: &str, delivered: usize, failed: usize) -> String {
    format!("{kind} dispatcher stopped ({delivered} delivered, {failed} failed)")
}

pub fn whitelist_loaded(channels: usize) -> String {
    format!("Answering in {channels} whitelisted channel(s)")
}

pub fn routing_table(commands: usize, aliases: usize) -> String {
    format!("Routing table ready: {commands} commands, {aliases} aliases")
}
