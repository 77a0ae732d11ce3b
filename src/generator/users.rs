//! Identity generation: user accounts with unique handles and emails.

use crate::fake::FakeData;
use crate::generator::GenContext;
use crate::model::{Role, User, UserStatus};
use ahash::AHashSet;
use rand_chacha::ChaCha8Rng;

/// Shared bcrypt hash of the dev-environment password (`password123`).
const PASSWORD_HASH: &str = "$2b$10$psOj32xIbX55J27LFnroG.l4YQgexQtJOPnO7CkNbXV2yfGzQLtc.";

/// Fixed development accounts seeded before the random population. They
/// count toward the requested user total.
const DEV_ACCOUNTS: &[(&str, i64, Role)] = &[
    ("alice", 25_000, Role::User),
    ("bob", 30_000, Role::User),
    ("charlie", 20_000, Role::User),
    ("david", 45_000, Role::User),
    ("emma", 35_000, Role::User),
    ("frank", 28_000, Role::User),
    ("operator", 100_000, Role::Operator),
    ("admin", 100_000, Role::Operator),
];

const STATUS_WEIGHTS: &[(UserStatus, u32)] = &[
    (UserStatus::Active, 95),
    (UserStatus::Suspended, 4),
    (UserStatus::Warning, 1),
];

const ROLE_WEIGHTS: &[(Role, u32)] = &[(Role::User, 95), (Role::Operator, 5)];

pub fn generate(ctx: &mut GenContext, count: usize) {
    let mut usernames: AHashSet<String> = AHashSet::new();
    let mut emails: AHashSet<String> = AHashSet::new();

    for &(name, balance, role) in DEV_ACCOUNTS.iter().take(count) {
        let email = format!("{name}@example.com");
        usernames.insert(name.to_string());
        emails.insert(email.clone());
        let user_id = ctx.fake.uuid();
        let created_at = ctx.fake.datetime_days_back(365);
        ctx.data.users.push(User {
            user_id,
            username: name.to_string(),
            password_hash: PASSWORD_HASH.to_string(),
            email,
            status: UserStatus::Active,
            balance,
            created_at,
            role,
        });
    }

    while ctx.data.users.len() < count {
        let username = unique_username(&mut ctx.fake, &mut usernames);
        let email = unique_email(&mut ctx.fake, &mut emails);
        let user_id = ctx.fake.uuid();
        let status = *ctx.fake.weighted(STATUS_WEIGHTS);
        let role = *ctx.fake.weighted(ROLE_WEIGHTS);
        let balance = ctx.fake.int_range(1000, 50_000);
        let created_at = ctx.fake.datetime_days_back(365);
        ctx.data.users.push(User {
            user_id,
            username,
            password_hash: PASSWORD_HASH.to_string(),
            email,
            status,
            balance,
            created_at,
            role,
        });
    }
}

fn unique_username(fake: &mut FakeData<ChaCha8Rng>, taken: &mut AHashSet<String>) -> String {
    loop {
        let candidate = fake.username();
        if !taken.contains(&candidate) {
            taken.insert(candidate.clone());
            return candidate;
        }
        // Collision: salt with a numeric suffix before trying a new draw.
        let salted = format!("{candidate}{}", fake.int_range(1, 9999));
        if !taken.contains(&salted) {
            taken.insert(salted.clone());
            return salted;
        }
    }
}

fn unique_email(fake: &mut FakeData<ChaCha8Rng>, taken: &mut AHashSet<String>) -> String {
    loop {
        let candidate = fake.email();
        if !taken.contains(&candidate) {
            taken.insert(candidate.clone());
            return candidate;
        }
        // Salt the local part so the address stays well-formed.
        if let Some((local, domain)) = candidate.split_once('@') {
            let salted = format!("{local}{}@{domain}", fake.int_range(1, 9999));
            if !taken.contains(&salted) {
                taken.insert(salted.clone());
                return salted;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_and_emails_are_unique() {
        let mut ctx = GenContext::new(42);
        generate(&mut ctx, 500);
        assert_eq!(ctx.data.users.len(), 500);

        let usernames: AHashSet<&str> =
            ctx.data.users.iter().map(|u| u.username.as_str()).collect();
        let emails: AHashSet<&str> = ctx.data.users.iter().map(|u| u.email.as_str()).collect();
        assert_eq!(usernames.len(), 500);
        assert_eq!(emails.len(), 500);
    }

    #[test]
    fn dev_accounts_come_first() {
        let mut ctx = GenContext::new(42);
        generate(&mut ctx, 10);
        assert_eq!(ctx.data.users[0].username, "alice");
        assert_eq!(ctx.data.users[7].username, "admin");
        assert_eq!(ctx.data.users[7].role, Role::Operator);
    }

    #[test]
    fn small_count_truncates_dev_accounts() {
        let mut ctx = GenContext::new(42);
        generate(&mut ctx, 3);
        assert_eq!(ctx.data.users.len(), 3);
        assert_eq!(ctx.data.users[2].username, "charlie");
    }
}
