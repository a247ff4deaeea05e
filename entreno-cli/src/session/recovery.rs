/// Tokens carried by a password-recovery link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: Option<i64>,
}

/// Extract the session tokens from a recovery link. The provider puts them in
/// the URL fragment (`#access_token=...&refresh_token=...&type=recovery`);
/// query parameters are accepted too.
pub fn parse_recovery_link(link: &str) -> Option<RecoveryTokens> {
    let params = link
        .split_once('#')
        .map(|(_, fragment)| fragment)
        .or_else(|| link.split_once('?').map(|(_, query)| query))
        .unwrap_or(link);

    let mut access_token = None;
    let mut refresh_token = None;
    let mut expires_in = None;

    for pair in params.split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        match key {
            "access_token" => access_token = Some(value.to_string()),
            "refresh_token" => refresh_token = Some(value.to_string()),
            "expires_in" => expires_in = value.parse().ok(),
            _ => {}
        }
    }

    Some(RecoveryTokens {
        access_token: access_token.filter(|t| !t.is_empty())?,
        refresh_token: refresh_token.unwrap_or_default(),
        expires_in,
    })
}
