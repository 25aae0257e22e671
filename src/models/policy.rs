//! Static policy information served at `/policy`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyInfo {
    pub policy: String,
    pub contact: String,
    pub email: String,
    pub license: String,
}

impl PolicyInfo {
    pub fn current() -> Self {
        Self {
            policy: "This Microservice is for educational purposes only.".to_string(),
            contact: "mr.junaidshaukat@gmail.com".to_string(),
            email: "https://www.linkedin.com/in/mrjunaid/".to_string(),
            license: "MIT".to_string(),
        }
    }
}
