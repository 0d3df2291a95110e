use crate::{AppError, AppResult};

/// bcrypt only reads this many bytes; anything longer would be silently cut.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Salt and digest of an unrelated bcrypt hash. Verifying against it costs
/// the same as a real check and never matches a caller's password.
const DUMMY_SALT_AND_DIGEST: &str = "R9h/cIPz0gi.URNNX3kh2OPST9/PgBkqquzi.Ss7KIUgO2t0jWMUW";

pub fn check_password(password: &str) -> AppResult<()> {
    if password.is_empty() {
        return Err(AppError::required("password"));
    }
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(AppError::Validation(format!(
            "password must be at most {MAX_PASSWORD_BYTES} bytes"
        )));
    }
    Ok(())
}

/// bcrypt with a fixed cost. Hashing and verifying are slow on purpose, so
/// both run on the blocking pool.
#[derive(Debug, Clone, Copy)]
pub struct Hasher {
    cost: u32,
}

impl Hasher {
    pub fn new(cost: u32) -> Hasher {
        Hasher { cost }
    }

    pub async fn hash(&self, password: String) -> AppResult<String> {
        let cost = self.cost;
        Ok(tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??)
    }

    pub async fn verify(&self, password: String, hash: String) -> AppResult<bool> {
        Ok(tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??)
    }

    /// Same work as [`Hasher::verify`] at this hasher's cost, for lookups
    /// that found no identity.
    pub async fn verify_nothing(&self, password: String) -> AppResult<()> {
        self.verify(password, self.dummy_hash()).await?;
        Ok(())
    }

    fn dummy_hash(&self) -> String {
        format!("$2b${:02}${DUMMY_SALT_AND_DIGEST}", self.cost)
    }
}
