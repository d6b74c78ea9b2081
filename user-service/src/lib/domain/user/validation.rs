use validation::field::ErrorList;
use validation::field::Path;
use validation::rules::Bounded;
use validation::rules::Field;
use validation::rules::RuleSet;

use crate::domain::user::models::UserRecord;

pub const MIN_LENGTH: usize = 5;
pub const MAX_LENGTH: usize = 255;

const ROOT: &str = "User";

fn id(user: &UserRecord) -> Option<&str> {
    user.id.as_deref()
}

fn login(user: &UserRecord) -> Option<&str> {
    user.login.as_deref()
}

fn email(user: &UserRecord) -> Option<&str> {
    user.email.as_deref()
}

fn password(user: &UserRecord) -> Option<&str> {
    user.password.as_deref()
}

const ID: Field<UserRecord> = Field::new("ID", id);
const LOGIN: Field<UserRecord> = Field::new("Login", login);
const EMAIL: Field<UserRecord> = Field::new("Email", email);
const PASSWORD: Field<UserRecord> = Field::new("Password", password);

static UPDATE_IMMUTABLE: [Field<UserRecord>; 3] = [ID, EMAIL, LOGIN];
// Passwords change only through the dedicated password endpoint
static UPDATE_FORBIDDEN: [Field<UserRecord>; 1] = [PASSWORD];

static REGISTER_FORBIDDEN: [Field<UserRecord>; 1] = [ID];
static REGISTER_REQUIRED: [Field<UserRecord>; 3] = [EMAIL, LOGIN, PASSWORD];
static REGISTER_BOUNDS: [Bounded<UserRecord>; 3] = [
    Bounded::new(EMAIL, MIN_LENGTH, MAX_LENGTH),
    Bounded::new(LOGIN, MIN_LENGTH, MAX_LENGTH),
    Bounded::new(PASSWORD, MIN_LENGTH, MAX_LENGTH),
];

static PASSWORD_BOUNDS: [Bounded<UserRecord>; 1] =
    [Bounded::new(PASSWORD, MIN_LENGTH, MAX_LENGTH)];

static UPDATE_RULES: RuleSet<'static, UserRecord> = RuleSet::new()
    .immutable(&UPDATE_IMMUTABLE)
    .forbidden(&UPDATE_FORBIDDEN);

static REGISTER_RULES: RuleSet<'static, UserRecord> = RuleSet::new()
    .forbidden(&REGISTER_FORBIDDEN)
    .required(&REGISTER_REQUIRED)
    .bounded(&REGISTER_BOUNDS);

static PASSWORD_RULES: RuleSet<'static, UserRecord> = RuleSet::new().bounded(&PASSWORD_BOUNDS);

/// Validate a general update of an existing user.
pub fn validate_user_update(new: &UserRecord, old: &UserRecord) -> ErrorList {
    UPDATE_RULES.validate(&Path::new(ROOT), new, Some(old))
}

/// Validate a registration request.
pub fn validate_user_register(new: &UserRecord) -> ErrorList {
    REGISTER_RULES.validate(&Path::new(ROOT), new, None)
}

/// Validate the new password of a password change.
pub fn validate_password_change(password: &str) -> ErrorList {
    let record = UserRecord {
        password: Some(password.to_string()),
        ..Default::default()
    };
    PASSWORD_RULES.validate(&Path::new(ROOT), &record, None)
}
