use anyhow::bail;
use blake2::{Blake2b, Digest};

use crate::config::AdminConfig;

/// Admin calls carry a bearer token; only its digest is ever stored.
/// Session mechanics live outside this service entirely.
pub fn assert_admin(token: &str, cfg: &AdminConfig) -> anyhow::Result<()> {
    let configured = match &cfg.token_hash {
        Some(hash) => hash,
        None => bail!("Admin access is not configured"),
    };
    let digest = format!("{:x}", Blake2b::digest(token.as_bytes()));
    if &digest != configured {
        bail!("Not authorized");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_digest_must_match() {
        let cfg = AdminConfig {
            token_hash: Some(format!("{:x}", Blake2b::digest(b"letmein"))),
        };
        assert!(assert_admin("letmein", &cfg).is_ok());
        assert!(assert_admin("wrong", &cfg).is_err());
    }

    #[test]
    fn unconfigured_admin_refuses_everything() {
        let cfg = AdminConfig { token_hash: None };
        assert!(assert_admin("anything", &cfg).is_err());
    }
}
