use clap::Args;
use marketplace_app::{
    auth::PgAuthService,
    database::{self, Db},
    domain::users::{PgUsersService, UsersService, data::NewUser, records::Role},
};

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    /// Login name, unique across all accounts
    #[arg(long)]
    username: String,

    /// Account type: `business` or `customer`
    #[arg(long, value_parser = parse_role)]
    role: Role,

    #[arg(long, default_value = "")]
    first_name: String,

    #[arg(long, default_value = "")]
    last_name: String,

    #[arg(long, default_value = "")]
    email: String,

    /// Grant staff rights (may delete orders)
    #[arg(long)]
    staff: bool,

    /// Grant superuser rights (may delete orders)
    #[arg(long)]
    superuser: bool,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let users = PgUsersService::new(Db::new(pool.clone()));
    let auth = PgAuthService::new(pool);

    let user = users
        .create_user(NewUser {
            username: args.username,
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            role: args.role,
            is_staff: args.staff,
            is_superuser: args.superuser,
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    let issued = auth
        .issue_api_token(user.id)
        .await
        .map_err(|error| format!("failed to create token: {error}"))?;

    println!("user_id: {}", user.id);
    println!("username: {}", user.username);
    println!("role: {}", user.role);
    println!("api_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}

fn parse_role(raw: &str) -> Result<Role, String> {
    raw.parse::<Role>().map_err(|error| error.to_string())
}
