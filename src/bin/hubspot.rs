//! HubSpot command-line client.
//!
//! Thin wrapper over the library: every subcommand is one endpoint call and
//! prints the JSON answer.

use std::error::Error;
use std::fs;

use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hubspot_client::{
    ChangeLogParams, Config, Credentials, CrmObjectType, CrmObjectsClient, GetAllParams, HubSpot, HubSpotError,
    Response,
};

#[derive(Debug, Parser)]
#[command(name = "hubspot", version, about = "Call the HubSpot REST API")]
struct Cli {
    /// Developer API key (defaults to HUBSPOT_API_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// OAuth 2.0 access token (defaults to HUBSPOT_ACCESS_TOKEN)
    #[arg(long, global = true)]
    access_token: Option<String>,

    /// API root (defaults to HUBSPOT_BASE_URL or https://api.hubapi.com)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Log requests
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Deal pipelines
    #[command(subcommand)]
    Pipelines(PipelineCommand),
    /// Line items
    #[command(subcommand)]
    LineItems(ObjectCommand),
    /// Products
    #[command(subcommand)]
    Products(ObjectCommand),
    /// Any CRM object family by name (`line-items`, `products`)
    Objects {
        object_type: CrmObjectType,
        #[command(subcommand)]
        cmd: ObjectCommand,
    },
    /// OAuth 2.0 tokens
    #[command(subcommand)]
    Oauth(OAuthCommand),
}

#[derive(Debug, Subcommand)]
enum PipelineCommand {
    List,
    Get { id: String },
    /// PAYLOAD is inline JSON or @file
    Create { payload: String },
    Update { id: String, payload: String },
    Delete { id: String },
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Property to include (repeatable)
    #[arg(long = "property")]
    properties: Vec<String>,
    /// Property to include with its history (repeatable)
    #[arg(long = "property-with-history")]
    properties_with_history: Vec<String>,
    #[arg(long)]
    offset: Option<u64>,
}

#[derive(Debug, Subcommand)]
enum ObjectCommand {
    List(ListArgs),
    Get { id: u64 },
    BatchGet { ids: Vec<u64> },
    Create { payload: String },
    BatchCreate { payload: String },
    Update { id: u64, payload: String },
    BatchUpdate { payload: String },
    Delete { id: u64 },
    BatchDelete { ids: Vec<u64> },
    /// Change log; SINCE is epoch seconds/millis or RFC 3339
    Changes {
        #[arg(long)]
        since: Option<String>,
        #[arg(long)]
        change_type: Option<String>,
        #[arg(long)]
        object_id: Option<u64>,
    },
}

#[derive(Debug, Subcommand)]
enum OAuthCommand {
    /// Print the install URL
    AuthUrl {
        client_id: String,
        redirect_uri: String,
        #[arg(long = "scope")]
        scopes: Vec<String>,
    },
    /// Exchange an authorization code for tokens
    Token {
        client_id: String,
        client_secret: String,
        redirect_uri: String,
        code: String,
    },
    /// Refresh an access token
    Refresh {
        client_id: String,
        client_secret: String,
        refresh_token: String,
    },
    TokenInfo { token: String },
    RefreshInfo { token: String },
    Revoke { token: String },
}

fn init_logger(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("hubspot_client=debug,info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn read_payload(arg: &str) -> Result<Value, Box<dyn Error>> {
    let text = match arg.strip_prefix('@') {
        Some(path) => fs::read_to_string(path)?,
        None => arg.to_string(),
    };
    Ok(serde_json::from_str(&text)?)
}

fn print_response(response: &Response) -> Result<(), Box<dyn Error>> {
    match response.data() {
        Some(data) => println!("{}", serde_json::to_string_pretty(data)?),
        None if !response.body().is_empty() => println!("{}", response.text()),
        None => {}
    }
    Ok(())
}

fn run_objects(
    objects: CrmObjectsClient<'_>,
    cmd: ObjectCommand,
) -> Result<Response, Box<dyn Error>> {
    let response = match cmd {
        ObjectCommand::List(args) => objects.get_all(&GetAllParams {
            properties: args.properties,
            properties_with_history: args.properties_with_history,
            offset: args.offset,
            ..Default::default()
        })?,
        ObjectCommand::Get { id } => objects.get_by_id(id)?,
        ObjectCommand::BatchGet { ids } => objects.get_batch(&ids)?,
        ObjectCommand::Create { payload } => objects.create(&read_payload(&payload)?)?,
        ObjectCommand::BatchCreate { payload } => objects.create_batch(&read_payload(&payload)?)?,
        ObjectCommand::Update { id, payload } => objects.update(id, &read_payload(&payload)?)?,
        ObjectCommand::BatchUpdate { payload } => objects.update_batch(&read_payload(&payload)?)?,
        ObjectCommand::Delete { id } => objects.delete(id)?,
        ObjectCommand::BatchDelete { ids } => objects.delete_batch(&ids)?,
        ObjectCommand::Changes {
            since,
            change_type,
            object_id,
        } => {
            let mut params = match since {
                Some(s) => match s.parse::<i64>() {
                    Ok(epoch) => ChangeLogParams::since(epoch)?,
                    Err(_) => ChangeLogParams::since(s)?,
                },
                None => ChangeLogParams::default(),
            };
            params.change_type = change_type;
            params.object_id = object_id;
            objects.get_change_log(&params)?
        }
    };
    Ok(response)
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let mut config = Config::from_env()?;
    if let Some(key) = cli.api_key {
        config.credentials = Credentials::ApiKey(key);
    }
    if let Some(token) = cli.access_token {
        config.credentials = Credentials::OAuth2(token);
    }
    if let Some(url) = cli.base_url {
        config = config.base_url(url);
    }
    tracing::debug!("config: {:?}", config);

    let hubspot = HubSpot::new(config)?;

    let response = match cli.command {
        Command::Pipelines(cmd) => {
            let pipelines = hubspot.deal_pipelines();
            match cmd {
                PipelineCommand::List => pipelines.all()?,
                PipelineCommand::Get { id } => pipelines.get_by_id(&id)?,
                PipelineCommand::Create { payload } => pipelines.create(&read_payload(&payload)?)?,
                PipelineCommand::Update { id, payload } => {
                    pipelines.update(&id, &read_payload(&payload)?)?
                }
                PipelineCommand::Delete { id } => pipelines.delete(&id)?,
            }
        }
        Command::LineItems(cmd) => run_objects(hubspot.line_items(), cmd)?,
        Command::Products(cmd) => run_objects(hubspot.products(), cmd)?,
        Command::Objects { object_type, cmd } => {
            run_objects(hubspot.crm_objects(object_type), cmd)?
        }
        Command::Oauth(cmd) => {
            let oauth = hubspot.oauth2();
            match cmd {
                OAuthCommand::AuthUrl {
                    client_id,
                    redirect_uri,
                    scopes,
                } => {
                    let scopes: Vec<&str> = scopes.iter().map(String::as_str).collect();
                    println!("{}", oauth.get_auth_url(&client_id, &redirect_uri, &scopes));
                    return Ok(());
                }
                OAuthCommand::Token {
                    client_id,
                    client_secret,
                    redirect_uri,
                    code,
                } => oauth.get_tokens_by_code(&client_id, &client_secret, &redirect_uri, &code)?,
                OAuthCommand::Refresh {
                    client_id,
                    client_secret,
                    refresh_token,
                } => oauth.get_tokens_by_refresh(&client_id, &client_secret, &refresh_token)?,
                OAuthCommand::TokenInfo { token } => oauth.get_access_token_info(&token)?,
                OAuthCommand::RefreshInfo { token } => oauth.get_refresh_token_info(&token)?,
                OAuthCommand::Revoke { token } => oauth.delete_refresh_token(&token)?,
            }
        }
    };

    print_response(&response)
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    if let Err(e) = run(cli) {
        if let Some(HubSpotError::Status { response, .. }) = e.downcast_ref::<HubSpotError>() {
            eprintln!("{e}");
            eprintln!("{}", response.text());
        } else {
            eprintln!("Error: {e}");
        }
        std::process::exit(1);
    }
}
