use std::collections::HashMap;

use super::RemoteError;

pub(crate) const SERVICE_NAME: &str = "taskflow-session";

async fn open() -> Result<oo7::Keyring, RemoteError> {
    oo7::Keyring::new()
        .await
        .map_err(|e| RemoteError::Keyring(format!("Failed to connect to keyring: {}", e)))
}

fn attributes(server: &str) -> HashMap<&str, &str> {
    let mut attrs = HashMap::new();
    attrs.insert("service", SERVICE_NAME);
    attrs.insert("server", server);
    attrs
}

/// Store the refresh token of the signed-in session, replacing any previous one.
pub async fn store_refresh_token(server: &str, refresh_token: &str) -> Result<(), RemoteError> {
    let keyring = open().await?;
    keyring
        .create_item(
            &format!("TaskFlow session ({})", server),
            &attributes(server),
            refresh_token.as_bytes(),
            true, // replace existing
        )
        .await
        .map_err(|e| RemoteError::Keyring(format!("Failed to store session: {}", e)))?;
    Ok(())
}

pub async fn load_refresh_token(server: &str) -> Result<Option<String>, RemoteError> {
    let keyring = open().await?;
    let items = keyring
        .search_items(&attributes(server))
        .await
        .map_err(|e| RemoteError::Keyring(format!("Failed to search keyring: {}", e)))?;

    let Some(item) = items.first() else {
        return Ok(None);
    };
    let secret = item
        .secret()
        .await
        .map_err(|e| RemoteError::Keyring(format!("Failed to read secret: {}", e)))?;
    let token = String::from_utf8(secret.to_vec())
        .map_err(|e| RemoteError::Keyring(format!("Invalid UTF-8 in secret: {}", e)))?;

    Ok(Some(token).filter(|t| !t.is_empty()))
}

pub async fn forget_refresh_token(server: &str) -> Result<(), RemoteError> {
    let keyring = open().await?;
    let items = keyring
        .search_items(&attributes(server))
        .await
        .map_err(|e| RemoteError::Keyring(format!("Failed to search keyring: {}", e)))?;

    for item in items {
        item.delete()
            .await
            .map_err(|e| RemoteError::Keyring(format!("Failed to delete session: {}", e)))?;
    }

    Ok(())
}
