use actix_cors::Cors;
use actix_web::{
    delete,
    error::JsonPayloadError,
    get,
    http::header,
    middleware::Logger,
    post,
    web::{self, Data},
    App, HttpRequest, HttpResponse, HttpServer, Responder,
};
use common::{
    req::{ClientCheckIn, Credentials, SensorReport},
    res::{InfoResponse, LoginResponse, RegisterResponse, ResultCode},
};

use crate::{
    auth::{password, Auth, TokenIssuer},
    db::{Account, Store, StoreError},
    error::ApiError,
    utils,
};

type ApiResult = Result<HttpResponse, ApiError>;

#[get("/")]
async fn hello() -> impl Responder {
    HttpResponse::Ok().body(concat!("sensor-hub ", env!("CARGO_PKG_VERSION")))
}

// ===============================================
// account
// ===============================================

#[post("/account/register")]
async fn register(store: Data<Store>, body: web::Json<Credentials>) -> ApiResult {
    let credentials = body.into_inner();
    if !credentials.is_complete() {
        return Err(ApiError::BadRequest("username and password are required".into()));
    }
    let Credentials {
        username,
        password: plaintext,
    } = credentials;

    let account = web::block(move || -> Result<Account, ApiError> {
        let hashword = password::hash(&plaintext)?;
        Ok(store.create_account(&username, &hashword, utils::now())?)
    })
    .await??;

    log::info!("registered account `{}`", account.username);
    Ok(HttpResponse::Created().json(RegisterResponse {
        result: ResultCode::Ok,
        account: account.into(),
    }))
}

#[post("/account/login")]
async fn login(
    store: Data<Store>,
    tokens: Data<TokenIssuer>,
    body: web::Json<Credentials>,
) -> ApiResult {
    let Credentials {
        username,
        password: plaintext,
    } = body.into_inner();
    let account = web::block(move || -> Result<Option<Account>, ApiError> {
        match store.find_account_by_username(&username) {
            Ok(account) if password::verify(&plaintext, &account.password) => Ok(Some(account)),
            Ok(_) => Ok(None),
            Err(StoreError::NotFound) => {
                password::verify_dummy(&plaintext);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    })
    .await??;

    let Some(account) = account else {
        log::warn!("rejected login");
        return Err(ApiError::Unauthorized("incorrect username or password"));
    };

    let token = tokens.issue(&account.username)?;
    Ok(HttpResponse::Ok().json(LoginResponse {
        result: ResultCode::Ok,
        token,
        account: account.into(),
    }))
}

#[get("/account/info")]
async fn info(auth: Auth) -> impl Responder {
    let claims = auth.claims();
    HttpResponse::Ok().json(InfoResponse {
        result: ResultCode::Ok,
        username: auth.username().to_owned(),
        issued_at: claims.iat,
        expires_at: claims.exp,
    })
}

// ===============================================
// client
// ===============================================

#[get("/client")]
async fn clients(store: Data<Store>) -> ApiResult {
    let clients = web::block(move || store.list_latest_clients()).await??;
    Ok(HttpResponse::Ok().json(clients))
}

#[post("/client")]
async fn check_in(store: Data<Store>, body: web::Json<ClientCheckIn>) -> ApiResult {
    let check_in = body.into_inner();
    if !check_in.is_complete() {
        return Err(ApiError::BadRequest("ip_address and node_name are required".into()));
    }

    let client = web::block(move || {
        store.create_client_check_in(&check_in.ip_address, &check_in.node_name, utils::now())
    })
    .await??;

    log::debug!("check-in {} from {}", client.node_name, client.ip_address);
    Ok(HttpResponse::Created().json(client))
}

// ===============================================
// sensors
// ===============================================

#[get("/sensors")]
async fn sensor_nodes(store: Data<Store>) -> ApiResult {
    let nodes = web::block(move || store.list_sensor_nodes()).await??;
    Ok(HttpResponse::Ok().json(nodes))
}

#[get("/sensors/all")]
async fn latest_sensors(store: Data<Store>) -> ApiResult {
    let sensors = web::block(move || store.list_latest_sensors()).await??;
    Ok(HttpResponse::Ok().json(sensors))
}

#[get("/sensors/{node_name}")]
async fn sensors_by_node(store: Data<Store>, node_name: web::Path<String>) -> ApiResult {
    let node_name = node_name.into_inner();
    let lookup = node_name.clone();
    let sensors = web::block(move || store.list_sensors_by_node_name(&lookup)).await??;

    if sensors.is_empty() {
        return Err(ApiError::NotFound(format!("no sensors for node `{node_name}`")));
    }
    Ok(HttpResponse::Ok().json(sensors))
}

#[post("/sensors")]
async fn add_sensor(store: Data<Store>, body: web::Json<SensorReport>) -> ApiResult {
    let report = body.into_inner();
    if !report.is_complete() {
        return Err(ApiError::BadRequest("node_name and sensor_id are required".into()));
    }

    let sensor = web::block(move || store.create_sensor_reading(&report, utils::now())).await??;
    Ok(HttpResponse::Created().json(sensor))
}

#[delete("/sensors/{node_name}")]
async fn delete_sensors(store: Data<Store>, node_name: web::Path<String>) -> ApiResult {
    let node_name = node_name.into_inner();
    let lookup = node_name.clone();

    match web::block(move || store.delete_sensors_by_node_name(&lookup)).await? {
        Ok(deleted) => {
            log::info!("deleted {deleted} reading(s) of node `{node_name}`");
            Ok(HttpResponse::NoContent().finish())
        }
        Err(StoreError::NotFound) => Err(ApiError::NotFound(format!(
            "no sensors for node `{node_name}`"
        ))),
        Err(e) => Err(e.into()),
    }
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::BadRequest(err.to_string()).into()
}

/// Registers every route. `/sensors/all` goes before `/sensors/{node_name}`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .service(hello)
        .service(register)
        .service(login)
        .service(info)
        .service(clients)
        .service(check_in)
        .service(sensor_nodes)
        .service(latest_sensors)
        .service(sensors_by_node)
        .service(add_sensor)
        .service(delete_sensors);
}

pub async fn new_http_server(
    store: Store,
    tokens: TokenIssuer,
    bind: (String, u16),
) -> std::io::Result<()> {
    let store = Data::new(store);
    let tokens = Data::new(tokens);

    HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .app_data(tokens.clone())
            .configure(configure)
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST", "DELETE"])
                    .allowed_headers(vec![header::AUTHORIZATION, header::ACCEPT])
                    .allowed_header(header::CONTENT_TYPE)
                    .max_age(3600),
            )
    })
    .bind(bind)?
    .run()
    .await
}
