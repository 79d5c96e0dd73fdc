use crate::db::worker::schema::Worker;
use crate::{service, Result};
use actix_web::{
    dev::ServiceResponse,
    http::{
        header::{self, HeaderMap},
        StatusCode,
    },
    middleware::ErrorHandlerResponse,
    post,
    web::{Data, Json},
    HttpRequest, HttpResponseBuilder,
};
use deadpool_sqlite::Pool;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Map, Value};
use strum::Display;

#[derive(Deserialize)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: RpcMethod,
    pub params: Option<Value>,
    pub id: Value,
}

#[derive(Deserialize, Display, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RpcMethod {
    // session
    Login,
    Logout,
    Whoami,
    ChangePassword,
    // building
    AddBuilding,
    GetBuildingDashboard,
    // worker
    AddWorker,
    SetCurrentBuilding,
    GetWorkerDashboard,
    GetAssistantSuggestions,
    // task
    AddTask,
    StartTask,
    CompleteTask,
    ReopenTask,
    // assignment
    AssignWorker,
    UnassignWorker,
    // operations
    GetAdminDashboard,
    SyncWeather,
    GenerateReports,
    VerifySchema,
}

#[derive(Serialize)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
    pub id: Value,
}

#[derive(Serialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
    pub data: Option<Value>,
}

impl RpcError {
    fn parse_error(data: Option<Value>) -> Self {
        Self {
            code: -32700,
            message: "Parse error".into(),
            data,
        }
    }
    fn server_error(data: Option<Value>) -> Self {
        Self {
            code: -32000,
            message: "Server error".into(),
            data,
        }
    }
}

impl RpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            result: Some(result),
            error: None,
            id,
        }
    }

    pub fn error(error: RpcError) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            result: None,
            error: Some(error),
            id: Value::Null,
        }
    }

    pub fn from<R>(id: Value, val: R) -> Result<Self>
    where
        R: Serialize,
    {
        Ok(Self::success(id, serde_json::to_value(&val)?))
    }

    fn invalid_request(id: Value) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            result: None,
            error: Some(RpcError {
                code: -32600,
                message: "Invalid Request".into(),
                data: None,
            }),
            id,
        }
    }
}

const PUBLIC_METHODS: &[RpcMethod] = &[RpcMethod::Login];

#[post("")]
pub async fn handle(
    req: HttpRequest,
    req_body: String,
    pool: Data<Pool>,
) -> Result<Json<RpcResponse>> {
    let headers = req.headers();
    let Ok(req) = serde_json::from_str::<Map<String, Value>>(&req_body) else {
        let error_data = json!("Request body is not a valid JSON object");
        return Ok(Json(RpcResponse::error(RpcError::parse_error(Some(
            error_data,
        )))));
    };
    let req: RpcRequest = match serde_json::from_value(Value::Object(req)) {
        Ok(val) => val,
        Err(e) => {
            let data = Value::String(e.to_string());
            let e = RpcError::parse_error(Some(data));
            return Ok(Json(RpcResponse::error(e)));
        }
    };
    let secret = extract_secret(headers, &req.params);
    let caller: Option<Worker> = if !PUBLIC_METHODS.contains(&req.method) {
        Some(service::auth::check_rpc(secret.clone(), &req.method, &pool).await?)
    } else {
        None
    };
    if req.jsonrpc != "2.0" {
        return Ok(Json(RpcResponse::invalid_request(Value::Null)));
    }
    let res: RpcResponse = match req.method {
        // session
        RpcMethod::Login => RpcResponse::from(
            req.id.clone(),
            super::login::run(params(req.params)?, &pool).await?,
        ),
        RpcMethod::Logout => {
            RpcResponse::from(req.id.clone(), super::logout::run(secret, &pool).await?)
        }
        RpcMethod::Whoami => {
            RpcResponse::from(req.id.clone(), super::whoami::run(&caller.unwrap()).await?)
        }
        RpcMethod::ChangePassword => RpcResponse::from(
            req.id.clone(),
            super::change_password::run(params(req.params)?, &caller.unwrap(), &pool).await?,
        ),
        // building
        RpcMethod::AddBuilding => RpcResponse::from(
            req.id.clone(),
            super::add_building::run(params(req.params)?, &caller.unwrap(), &pool).await?,
        ),
        RpcMethod::GetBuildingDashboard => RpcResponse::from(
            req.id.clone(),
            super::get_building_dashboard::run(params(req.params)?, &pool).await?,
        ),
        // worker
        RpcMethod::AddWorker => RpcResponse::from(
            req.id.clone(),
            super::add_worker::run(params(req.params)?, &caller.unwrap(), &pool).await?,
        ),
        RpcMethod::SetCurrentBuilding => RpcResponse::from(
            req.id.clone(),
            super::set_current_building::run(params(req.params)?, &caller.unwrap(), &pool).await?,
        ),
        RpcMethod::GetWorkerDashboard => RpcResponse::from(
            req.id.clone(),
            super::get_worker_dashboard::run(params(req.params)?, &caller.unwrap(), &pool).await?,
        ),
        RpcMethod::GetAssistantSuggestions => RpcResponse::from(
            req.id.clone(),
            super::get_assistant_suggestions::run(&caller.unwrap(), &pool).await?,
        ),
        // task
        RpcMethod::AddTask => RpcResponse::from(
            req.id.clone(),
            super::add_task::run(params(req.params)?, &caller.unwrap(), &pool).await?,
        ),
        RpcMethod::StartTask => RpcResponse::from(
            req.id.clone(),
            super::start_task::run(params(req.params)?, &caller.unwrap(), &pool).await?,
        ),
        RpcMethod::CompleteTask => RpcResponse::from(
            req.id.clone(),
            super::complete_task::run(params(req.params)?, &caller.unwrap(), &pool).await?,
        ),
        RpcMethod::ReopenTask => RpcResponse::from(
            req.id.clone(),
            super::reopen_task::run(params(req.params)?, &caller.unwrap(), &pool).await?,
        ),
        // assignment
        RpcMethod::AssignWorker => RpcResponse::from(
            req.id.clone(),
            super::assign_worker::run(params(req.params)?, &caller.unwrap(), &pool).await?,
        ),
        RpcMethod::UnassignWorker => RpcResponse::from(
            req.id.clone(),
            super::unassign_worker::run(params(req.params)?, &caller.unwrap(), &pool).await?,
        ),
        // operations
        RpcMethod::GetAdminDashboard => {
            RpcResponse::from(req.id.clone(), super::get_admin_dashboard::run(&pool).await?)
        }
        RpcMethod::SyncWeather => RpcResponse::from(
            req.id.clone(),
            super::sync_weather::run(&caller.unwrap(), &pool).await?,
        ),
        RpcMethod::GenerateReports => RpcResponse::from(
            req.id.clone(),
            super::generate_reports::run(params(req.params)?, &caller.unwrap(), &pool).await?,
        ),
        RpcMethod::VerifySchema => RpcResponse::from(
            req.id.clone(),
            super::verify_schema::run(&caller.unwrap(), &pool).await?,
        ),
    }?;
    Ok(Json(res))
}

/// Missing params deserialize as an empty object, so methods with optional
/// params work without one and methods with required params report the
/// missing field by name.
fn params<T>(val: Option<Value>) -> Result<T>
where
    T: DeserializeOwned,
{
    Ok(serde_json::from_value(
        val.unwrap_or(Value::Object(Map::new())),
    )?)
}

pub fn handle_rpc_error<B>(res: ServiceResponse<B>) -> actix_web::Result<ErrorHandlerResponse<B>> {
    let (req, res) = res.into_parts();
    let error_message = res.error().unwrap().to_string();
    let body = RpcResponse::error(RpcError::server_error(Some(Value::String(error_message))));
    let body = serde_json::to_string(&body).unwrap();
    let res = HttpResponseBuilder::new(StatusCode::OK).body(body);
    let res = ServiceResponse::new(req, res)
        .map_into_boxed_body()
        .map_into_right_body();
    Ok(ErrorHandlerResponse::Response(res))
}

fn extract_secret(headers: &HeaderMap, params: &Option<Value>) -> String {
    if headers.contains_key(header::AUTHORIZATION) {
        let header = headers
            .get(header::AUTHORIZATION)
            .unwrap()
            .to_str()
            .unwrap_or_default();
        return header.replace("Bearer ", "");
    }
    let Some(params) = params else {
        return "".into();
    };
    let Some(token) = params.get("token") else {
        return "".into();
    };
    let Some(token) = token.as_str() else {
        return "".into();
    };
    token.into()
}
