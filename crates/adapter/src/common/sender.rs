/// Builds the `From` header. SMTP providers usually insist that the address is the
/// authenticated account, so only the display name is taken from config,
/// with quotes and angle brackets stripped.
pub fn format_sender(display: Option<&str>, address: &str) -> String {
    let name = display
        .map(|d| d.split('<').next().unwrap_or(""))
        .map(|d| d.replace(['"', '<', '>'], ""))
        .map(|d| d.trim().to_string())
        .unwrap_or_default();

    if name.is_empty() {
        address.to_string()
    } else {
        format!("{} <{}>", name, address)
    }
}
