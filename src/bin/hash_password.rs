//! One-off utility that prints the bcrypt hash of the owner password, for
//! pasting into `OWNER_PASSWORD_HASH`.
//!
//! ```sh
//! cargo run --bin hash_password
//! ```

fn main() {
    let hash = bcrypt::hash("satya", 10).expect("bcrypt hashing failed");
    println!("Hashed password: {hash}");
}
