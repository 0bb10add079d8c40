//! # API crate — shared fullstack server functions for the leadflow CRM
//!
//! This crate is the backbone of the fullstack architecture. It defines every
//! Dioxus server function the web frontend calls, along with the supporting
//! modules they depend on.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`auth`] | — | Argon2id password hashing and the session key constant |
//! | [`db`] | `server` | PostgreSQL connection pool (lazy `OnceCell` singleton) and migrations |
//! | [`import`] | — | CSV lead parsing (header subset check, per-row tolerance) |
//! | [`metrics`] | — | Dashboard aggregation types; computation behind `server` |
//! | [`models`] | — | Database models and their client-safe `*Info` projections |
//! | [`webhook`] | `server` | WhatsApp inbound-message ingestion (lead upsert + dedup) |
//!
//! ## Server functions exposed here
//!
//! Every public `async fn` in this file is a Dioxus server function,
//! annotated with `#[get(...)]` or `#[post(...)]` and compiled twice: once
//! with full server logic (behind `#[cfg(feature = "server")]`) and once as a
//! thin client stub that simply forwards the call over HTTP.
//!
//! - **Authentication**: `get_current_user`, `login`, `logout`, `register`,
//!   `update_profile`
//! - **Leads**: `list_leads`, `get_lead`, `create_lead`, `update_lead`,
//!   `update_lead_status`, `delete_lead`, `import_leads`
//! - **Users**: `list_assignable_users`, `list_users`, `create_user`,
//!   `update_user`, `delete_user`
//! - **WhatsApp**: `list_conversations`, `list_messages`
//! - **Activities**: `list_activities`, `create_activity`,
//!   `set_activity_completed`
//! - **Dashboard**: `dashboard_metrics`

use dioxus::prelude::*;

pub mod auth;
pub mod db;
pub mod import;
pub mod metrics;
pub mod models;
#[cfg(feature = "server")]
pub mod webhook;

pub use metrics::{DashboardData, Periodo};
pub use models::{
    ActivityDraft, ActivityInfo, ActivityType, AppRole, AppUserInfo, Capability, ConversationInfo,
    LeadDraft, LeadInfo, LeadOrigin, LeadStatus, MessageDirection, WhatsappMessageInfo,
};

// ---------------------------------------------------------------------------
// Server-side helpers
// ---------------------------------------------------------------------------

/// Load the authenticated user for this session, or fail the call.
#[cfg(feature = "server")]
async fn current_app_user(
    session: &tower_sessions::Session,
) -> Result<models::AppUser, ServerFnError> {
    use crate::db::get_pool;

    let user_id: Option<String> = session
        .get(auth::SESSION_USER_ID_KEY)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let Some(user_id) = user_id else {
        return Err(ServerFnError::new("Não autenticado"));
    };

    let user_uuid =
        uuid::Uuid::parse_str(&user_id).map_err(|e| ServerFnError::new(e.to_string()))?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let user: Option<models::AppUser> = sqlx::query_as("SELECT * FROM app_users WHERE id = $1")
        .bind(user_uuid)
        .fetch_optional(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    user.ok_or_else(|| ServerFnError::new("Não autenticado"))
}

/// Check that the user's role grants `capability`.
#[cfg(feature = "server")]
fn require(user: &models::AppUser, capability: Capability) -> Result<(), ServerFnError> {
    if user.papel.can(capability) {
        Ok(())
    } else {
        tracing::warn!(user = %user.id, ?capability, "capability denied");
        Err(ServerFnError::new("Sem permissão para esta ação"))
    }
}

#[cfg(feature = "server")]
fn parse_uuid(value: &str) -> Result<uuid::Uuid, ServerFnError> {
    uuid::Uuid::parse_str(value).map_err(|e| ServerFnError::new(e.to_string()))
}

#[cfg(feature = "server")]
fn parse_uuid_opt(value: &Option<String>) -> Result<Option<uuid::Uuid>, ServerFnError> {
    value.as_deref().map(parse_uuid).transpose()
}

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

/// Get the current authenticated user from the session.
#[cfg(feature = "server")]
#[get("/api/auth/me", session: tower_sessions::Session)]
pub async fn get_current_user() -> Result<Option<AppUserInfo>, ServerFnError> {
    match current_app_user(&session).await {
        Ok(user) => Ok(Some(user.to_info())),
        Err(_) => Ok(None),
    }
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/me")]
pub async fn get_current_user() -> Result<Option<AppUserInfo>, ServerFnError> {
    Ok(None)
}

/// Log in with email and password.
#[cfg(feature = "server")]
#[post("/api/auth/login", session: tower_sessions::Session)]
pub async fn login(email: String, password: String) -> Result<AppUserInfo, ServerFnError> {
    use crate::db::get_pool;

    let email = email.trim().to_lowercase();

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let user: Option<models::AppUser> = sqlx::query_as("SELECT * FROM app_users WHERE email = $1")
        .bind(&email)
        .fetch_optional(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let Some(user) = user else {
        return Err(ServerFnError::new("Email ou senha inválidos"));
    };

    let Some(ref hash) = user.password_hash else {
        return Err(ServerFnError::new("Email ou senha inválidos"));
    };

    let valid = auth::verify_password(&password, hash).map_err(|e| ServerFnError::new(e))?;

    if !valid {
        tracing::warn!(%email, "failed login attempt");
        return Err(ServerFnError::new("Email ou senha inválidos"));
    }

    session
        .insert(auth::SESSION_USER_ID_KEY, user.id.to_string())
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(user.to_info())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/login")]
pub async fn login(email: String, password: String) -> Result<AppUserInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Log out the current user by clearing the session.
#[cfg(feature = "server")]
#[post("/api/auth/logout", session: tower_sessions::Session)]
pub async fn logout() -> Result<(), ServerFnError> {
    session
        .flush()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/logout")]
pub async fn logout() -> Result<(), ServerFnError> {
    Ok(())
}

/// Register a new account. New accounts get the `nenhum` role and stay
/// blocked behind the pending-approval screen until an admin assigns a role.
#[cfg(feature = "server")]
#[post("/api/auth/register", session: tower_sessions::Session)]
pub async fn register(
    nome: String,
    email: String,
    password: String,
) -> Result<AppUserInfo, ServerFnError> {
    use crate::db::get_pool;

    let email = email.trim().to_lowercase();
    let nome = nome.trim().to_string();

    if nome.is_empty() {
        return Err(ServerFnError::new("Nome é obrigatório"));
    }
    if email.is_empty() || !email.contains('@') {
        return Err(ServerFnError::new("Email inválido"));
    }
    if password.len() < 8 {
        return Err(ServerFnError::new("A senha deve ter pelo menos 8 caracteres"));
    }

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let existing: Option<(uuid::Uuid,)> =
        sqlx::query_as("SELECT id FROM app_users WHERE email = $1")
            .bind(&email)
            .fetch_optional(pool)
            .await
            .map_err(|e| ServerFnError::new(e.to_string()))?;

    if existing.is_some() {
        return Err(ServerFnError::new("Já existe uma conta com este email"));
    }

    let password_hash = auth::hash_password(&password).map_err(|e| ServerFnError::new(e))?;

    let user: models::AppUser = sqlx::query_as(
        "INSERT INTO app_users (nome, email, papel, password_hash) VALUES ($1, $2, 'nenhum', $3) RETURNING *",
    )
    .bind(&nome)
    .bind(&email)
    .bind(&password_hash)
    .fetch_one(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    session
        .insert(auth::SESSION_USER_ID_KEY, user.id.to_string())
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(user.to_info())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/register")]
pub async fn register(
    nome: String,
    email: String,
    password: String,
) -> Result<AppUserInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Update the current user's display name.
#[cfg(feature = "server")]
#[post("/api/profile", session: tower_sessions::Session)]
pub async fn update_profile(nome: String) -> Result<AppUserInfo, ServerFnError> {
    use crate::db::get_pool;

    let user = current_app_user(&session).await?;

    let nome = nome.trim().to_string();
    if nome.is_empty() {
        return Err(ServerFnError::new("Nome é obrigatório"));
    }

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let updated: models::AppUser = sqlx::query_as(
        "UPDATE app_users SET nome = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
    )
    .bind(&nome)
    .bind(user.id)
    .fetch_one(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(updated.to_info())
}

#[cfg(not(feature = "server"))]
#[post("/api/profile")]
pub async fn update_profile(nome: String) -> Result<AppUserInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

// ---------------------------------------------------------------------------
// Leads
// ---------------------------------------------------------------------------

/// All leads, newest first. This is the query behind the pipeline board and
/// the leads table; it has no side effects on the store.
#[cfg(feature = "server")]
#[get("/api/leads", session: tower_sessions::Session)]
pub async fn list_leads() -> Result<Vec<LeadInfo>, ServerFnError> {
    use crate::db::get_pool;

    let user = current_app_user(&session).await?;
    require(&user, Capability::ViewCrm)?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let leads: Vec<models::Lead> =
        sqlx::query_as("SELECT * FROM leads ORDER BY created_at DESC")
            .fetch_all(pool)
            .await
            .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(leads.iter().map(|l| l.to_info()).collect())
}

#[cfg(not(feature = "server"))]
#[get("/api/leads")]
pub async fn list_leads() -> Result<Vec<LeadInfo>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Fetch a single lead by id.
#[cfg(feature = "server")]
#[get("/api/leads/:id", session: tower_sessions::Session)]
pub async fn get_lead(id: String) -> Result<Option<LeadInfo>, ServerFnError> {
    use crate::db::get_pool;

    let user = current_app_user(&session).await?;
    require(&user, Capability::ViewCrm)?;

    let lead_id = parse_uuid(&id)?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let lead: Option<models::Lead> = sqlx::query_as("SELECT * FROM leads WHERE id = $1")
        .bind(lead_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(lead.map(|l| l.to_info()))
}

#[cfg(not(feature = "server"))]
#[get("/api/leads/:id")]
pub async fn get_lead(id: String) -> Result<Option<LeadInfo>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Create a lead from a form draft. `created_by` comes from the session.
#[cfg(feature = "server")]
#[post("/api/leads/create", session: tower_sessions::Session)]
pub async fn create_lead(draft: LeadDraft) -> Result<LeadInfo, ServerFnError> {
    use crate::db::get_pool;

    let user = current_app_user(&session).await?;
    require(&user, Capability::ViewCrm)?;

    if draft.nome.trim().is_empty() {
        return Err(ServerFnError::new("Nome é obrigatório"));
    }
    if draft.valor < 0.0 {
        return Err(ServerFnError::new("Valor não pode ser negativo"));
    }

    let responsavel = parse_uuid_opt(&draft.responsavel_id)?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let lead: models::Lead = sqlx::query_as(
        "INSERT INTO leads (nome, empresa, email, telefone, origem, valor, status, responsavel_id, created_by, observacoes)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
         RETURNING *",
    )
    .bind(draft.nome.trim())
    .bind(&draft.empresa)
    .bind(&draft.email)
    .bind(&draft.telefone)
    .bind(draft.origem)
    .bind(draft.valor)
    .bind(draft.status)
    .bind(responsavel)
    .bind(user.id)
    .bind(&draft.observacoes)
    .fetch_one(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(lead.to_info())
}

#[cfg(not(feature = "server"))]
#[post("/api/leads/create")]
pub async fn create_lead(draft: LeadDraft) -> Result<LeadInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Update every editable field of a lead.
#[cfg(feature = "server")]
#[post("/api/leads/update", session: tower_sessions::Session)]
pub async fn update_lead(id: String, draft: LeadDraft) -> Result<LeadInfo, ServerFnError> {
    use crate::db::get_pool;

    let user = current_app_user(&session).await?;
    require(&user, Capability::ViewCrm)?;

    if draft.nome.trim().is_empty() {
        return Err(ServerFnError::new("Nome é obrigatório"));
    }
    if draft.valor < 0.0 {
        return Err(ServerFnError::new("Valor não pode ser negativo"));
    }

    let lead_id = parse_uuid(&id)?;
    let responsavel = parse_uuid_opt(&draft.responsavel_id)?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let lead: models::Lead = sqlx::query_as(
        "UPDATE leads SET nome = $1, empresa = $2, email = $3, telefone = $4, origem = $5,
                valor = $6, status = $7, responsavel_id = $8, observacoes = $9, updated_at = NOW()
         WHERE id = $10
         RETURNING *",
    )
    .bind(draft.nome.trim())
    .bind(&draft.empresa)
    .bind(&draft.email)
    .bind(&draft.telefone)
    .bind(draft.origem)
    .bind(draft.valor)
    .bind(draft.status)
    .bind(responsavel)
    .bind(&draft.observacoes)
    .bind(lead_id)
    .fetch_one(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(lead.to_info())
}

#[cfg(not(feature = "server"))]
#[post("/api/leads/update")]
pub async fn update_lead(id: String, draft: LeadDraft) -> Result<LeadInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Move a lead to another pipeline stage. The board already checks ownership
/// client-side; this re-checks it so the rule holds regardless of caller.
#[cfg(feature = "server")]
#[post("/api/leads/status", session: tower_sessions::Session)]
pub async fn update_lead_status(lead_id: String, status: LeadStatus) -> Result<(), ServerFnError> {
    use crate::db::get_pool;

    let user = current_app_user(&session).await?;
    require(&user, Capability::ViewCrm)?;

    let lead_uuid = parse_uuid(&lead_id)?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let lead: Option<models::Lead> = sqlx::query_as("SELECT * FROM leads WHERE id = $1")
        .bind(lead_uuid)
        .fetch_optional(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let Some(lead) = lead else {
        return Err(ServerFnError::new("Lead não encontrado"));
    };

    if !user.papel.can(Capability::MoveAnyLead) && lead.responsavel_id != Some(user.id) {
        tracing::warn!(user = %user.id, lead = %lead.id, "blocked move of another user's lead");
        return Err(ServerFnError::new("Você só pode mover seus próprios leads"));
    }

    sqlx::query("UPDATE leads SET status = $1, updated_at = NOW() WHERE id = $2")
        .bind(status)
        .bind(lead_uuid)
        .execute(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/leads/status")]
pub async fn update_lead_status(lead_id: String, status: LeadStatus) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Delete a lead. Messages and activities cascade in the schema.
#[cfg(feature = "server")]
#[post("/api/leads/delete", session: tower_sessions::Session)]
pub async fn delete_lead(id: String) -> Result<(), ServerFnError> {
    use crate::db::get_pool;

    let user = current_app_user(&session).await?;
    require(&user, Capability::ViewCrm)?;

    let lead_id = parse_uuid(&id)?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    sqlx::query("DELETE FROM leads WHERE id = $1")
        .bind(lead_id)
        .execute(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/leads/delete")]
pub async fn delete_lead(id: String) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Bulk-insert leads parsed from a CSV file. All rows go in one
/// transaction; returns how many were inserted.
#[cfg(feature = "server")]
#[post("/api/leads/import", session: tower_sessions::Session)]
pub async fn import_leads(rows: Vec<LeadDraft>) -> Result<usize, ServerFnError> {
    use crate::db::get_pool;

    let user = current_app_user(&session).await?;
    require(&user, Capability::ViewCrm)?;

    if rows.is_empty() {
        return Err(ServerFnError::new("Nenhum lead válido encontrado para importar"));
    }

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let mut tx = pool
        .begin()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    for draft in &rows {
        let responsavel = parse_uuid_opt(&draft.responsavel_id)?;
        sqlx::query(
            "INSERT INTO leads (nome, empresa, email, telefone, origem, valor, status, responsavel_id, created_by, observacoes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(draft.nome.trim())
        .bind(&draft.empresa)
        .bind(&draft.email)
        .bind(&draft.telefone)
        .bind(draft.origem)
        .bind(draft.valor)
        .bind(draft.status)
        .bind(responsavel)
        .bind(user.id)
        .bind(&draft.observacoes)
        .execute(&mut *tx)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    }

    tx.commit()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    tracing::info!(count = rows.len(), user = %user.id, "imported leads");
    Ok(rows.len())
}

#[cfg(not(feature = "server"))]
#[post("/api/leads/import")]
pub async fn import_leads(rows: Vec<LeadDraft>) -> Result<usize, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Users a lead can be assigned to (admins and salespeople).
#[cfg(feature = "server")]
#[get("/api/users/assignable", session: tower_sessions::Session)]
pub async fn list_assignable_users() -> Result<Vec<AppUserInfo>, ServerFnError> {
    use crate::db::get_pool;

    let user = current_app_user(&session).await?;
    require(&user, Capability::ViewCrm)?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let users: Vec<models::AppUser> = sqlx::query_as(
        "SELECT * FROM app_users WHERE papel IN ('admin', 'vendedor') ORDER BY nome",
    )
    .fetch_all(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(users.iter().map(|u| u.to_info()).collect())
}

#[cfg(not(feature = "server"))]
#[get("/api/users/assignable")]
pub async fn list_assignable_users() -> Result<Vec<AppUserInfo>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Every account, pending ones included. Admin only.
#[cfg(feature = "server")]
#[get("/api/users", session: tower_sessions::Session)]
pub async fn list_users() -> Result<Vec<AppUserInfo>, ServerFnError> {
    use crate::db::get_pool;

    let user = current_app_user(&session).await?;
    require(&user, Capability::ManageUsers)?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let users: Vec<models::AppUser> =
        sqlx::query_as("SELECT * FROM app_users ORDER BY created_at")
            .fetch_all(pool)
            .await
            .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(users.iter().map(|u| u.to_info()).collect())
}

#[cfg(not(feature = "server"))]
#[get("/api/users")]
pub async fn list_users() -> Result<Vec<AppUserInfo>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Create an account with a role already assigned. Admin only.
#[cfg(feature = "server")]
#[post("/api/users/create", session: tower_sessions::Session)]
pub async fn create_user(
    nome: String,
    email: String,
    password: String,
    papel: AppRole,
) -> Result<AppUserInfo, ServerFnError> {
    use crate::db::get_pool;

    let user = current_app_user(&session).await?;
    require(&user, Capability::ManageUsers)?;

    let email = email.trim().to_lowercase();
    let nome = nome.trim().to_string();

    if nome.is_empty() || email.is_empty() || !email.contains('@') {
        return Err(ServerFnError::new("Campos obrigatórios ausentes: nome, email"));
    }
    if password.len() < 8 {
        return Err(ServerFnError::new("A senha deve ter pelo menos 8 caracteres"));
    }

    let password_hash = auth::hash_password(&password).map_err(|e| ServerFnError::new(e))?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let created: models::AppUser = sqlx::query_as(
        "INSERT INTO app_users (nome, email, papel, password_hash) VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(&nome)
    .bind(&email)
    .bind(papel)
    .bind(&password_hash)
    .fetch_one(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    tracing::info!(created = %created.id, by = %user.id, "user account created");
    Ok(created.to_info())
}

#[cfg(not(feature = "server"))]
#[post("/api/users/create")]
pub async fn create_user(
    nome: String,
    email: String,
    password: String,
    papel: AppRole,
) -> Result<AppUserInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Rename an account and/or change its role. Admin only.
#[cfg(feature = "server")]
#[post("/api/users/update", session: tower_sessions::Session)]
pub async fn update_user(
    id: String,
    nome: String,
    papel: AppRole,
) -> Result<AppUserInfo, ServerFnError> {
    use crate::db::get_pool;

    let user = current_app_user(&session).await?;
    require(&user, Capability::ManageUsers)?;

    let target = parse_uuid(&id)?;
    let nome = nome.trim().to_string();
    if nome.is_empty() {
        return Err(ServerFnError::new("Nome é obrigatório"));
    }

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let updated: models::AppUser = sqlx::query_as(
        "UPDATE app_users SET nome = $1, papel = $2, updated_at = NOW() WHERE id = $3 RETURNING *",
    )
    .bind(&nome)
    .bind(papel)
    .bind(target)
    .fetch_one(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(updated.to_info())
}

#[cfg(not(feature = "server"))]
#[post("/api/users/update")]
pub async fn update_user(
    id: String,
    nome: String,
    papel: AppRole,
) -> Result<AppUserInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Delete an account. Admin only; deleting yourself is rejected.
#[cfg(feature = "server")]
#[post("/api/users/delete", session: tower_sessions::Session)]
pub async fn delete_user(id: String) -> Result<(), ServerFnError> {
    use crate::db::get_pool;

    let user = current_app_user(&session).await?;
    require(&user, Capability::ManageUsers)?;

    let target = parse_uuid(&id)?;
    if target == user.id {
        return Err(ServerFnError::new("Você não pode excluir a sua própria conta"));
    }

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    sqlx::query("DELETE FROM app_users WHERE id = $1")
        .bind(target)
        .execute(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    tracing::info!(deleted = %target, by = %user.id, "user account deleted");
    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/users/delete")]
pub async fn delete_user(id: String) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

// ---------------------------------------------------------------------------
// WhatsApp conversations
// ---------------------------------------------------------------------------

/// One row per lead with messages, carrying the latest message. Newest
/// conversation first.
#[cfg(feature = "server")]
#[get("/api/whatsapp/conversations", session: tower_sessions::Session)]
pub async fn list_conversations() -> Result<Vec<ConversationInfo>, ServerFnError> {
    use crate::db::get_pool;

    let user = current_app_user(&session).await?;
    require(&user, Capability::ViewCrm)?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let rows: Vec<(uuid::Uuid, String, String, chrono::DateTime<chrono::Utc>)> = sqlx::query_as(
        "SELECT DISTINCT ON (m.lead_id) m.lead_id, l.nome, m.content, m.\"timestamp\"
         FROM whatsapp_messages m
         JOIN leads l ON l.id = m.lead_id
         ORDER BY m.lead_id, m.\"timestamp\" DESC",
    )
    .fetch_all(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    let mut conversations: Vec<ConversationInfo> = rows
        .into_iter()
        .map(|(lead_id, lead_nome, content, ts)| ConversationInfo {
            lead_id: lead_id.to_string(),
            lead_nome,
            last_message: content,
            last_timestamp: ts.to_rfc3339(),
        })
        .collect();
    // RFC 3339 UTC strings sort chronologically.
    conversations.sort_by(|a, b| b.last_timestamp.cmp(&a.last_timestamp));

    Ok(conversations)
}

#[cfg(not(feature = "server"))]
#[get("/api/whatsapp/conversations")]
pub async fn list_conversations() -> Result<Vec<ConversationInfo>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Full message history for one lead, oldest first.
#[cfg(feature = "server")]
#[get("/api/whatsapp/messages/:lead_id", session: tower_sessions::Session)]
pub async fn list_messages(lead_id: String) -> Result<Vec<WhatsappMessageInfo>, ServerFnError> {
    use crate::db::get_pool;

    let user = current_app_user(&session).await?;
    require(&user, Capability::ViewCrm)?;

    let lead_uuid = parse_uuid(&lead_id)?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let messages: Vec<models::WhatsappMessage> = sqlx::query_as(
        "SELECT * FROM whatsapp_messages WHERE lead_id = $1 ORDER BY \"timestamp\"",
    )
    .bind(lead_uuid)
    .fetch_all(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(messages.iter().map(|m| m.to_info()).collect())
}

#[cfg(not(feature = "server"))]
#[get("/api/whatsapp/messages/:lead_id")]
pub async fn list_messages(lead_id: String) -> Result<Vec<WhatsappMessageInfo>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

// ---------------------------------------------------------------------------
// Activities
// ---------------------------------------------------------------------------

/// Activities, due first. Pass a lead id for one lead's timeline or `None`
/// for the whole agenda.
#[cfg(feature = "server")]
#[get("/api/activities", session: tower_sessions::Session)]
pub async fn list_activities(lead_id: Option<String>) -> Result<Vec<ActivityInfo>, ServerFnError> {
    use crate::db::get_pool;

    let user = current_app_user(&session).await?;
    require(&user, Capability::ViewCrm)?;

    let lead_uuid = parse_uuid_opt(&lead_id)?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    type Row = (
        uuid::Uuid,
        uuid::Uuid,
        String,
        uuid::Uuid,
        uuid::Uuid,
        ActivityType,
        chrono::DateTime<chrono::Utc>,
        Option<String>,
        bool,
        Option<chrono::DateTime<chrono::Utc>>,
    );

    let rows: Vec<Row> = sqlx::query_as(
        "SELECT a.id, a.lead_id, l.nome, a.assigned_to_id, a.created_by_id, a.tipo,
                a.due_date, a.notes, a.is_completed, a.completed_at
         FROM activities a
         JOIN leads l ON l.id = a.lead_id
         WHERE $1::uuid IS NULL OR a.lead_id = $1
         ORDER BY a.due_date",
    )
    .bind(lead_uuid)
    .fetch_all(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(rows
        .into_iter()
        .map(
            |(id, lead_id, lead_nome, assigned, created_by, tipo, due, notes, done, done_at)| {
                ActivityInfo {
                    id: id.to_string(),
                    lead_id: lead_id.to_string(),
                    lead_nome,
                    assigned_to_id: assigned.to_string(),
                    created_by_id: created_by.to_string(),
                    tipo,
                    due_date: due.to_rfc3339(),
                    notes,
                    is_completed: done,
                    completed_at: done_at.map(|t| t.to_rfc3339()),
                }
            },
        )
        .collect())
}

#[cfg(not(feature = "server"))]
#[get("/api/activities")]
pub async fn list_activities(lead_id: Option<String>) -> Result<Vec<ActivityInfo>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Record a follow-up against a lead.
#[cfg(feature = "server")]
#[post("/api/activities/create", session: tower_sessions::Session)]
pub async fn create_activity(draft: ActivityDraft) -> Result<(), ServerFnError> {
    use crate::db::get_pool;

    let user = current_app_user(&session).await?;
    require(&user, Capability::ViewCrm)?;

    let lead_uuid = parse_uuid(&draft.lead_id)?;
    let assigned = parse_uuid(&draft.assigned_to_id)?;
    let due = chrono::DateTime::parse_from_rfc3339(&draft.due_date)
        .map_err(|e| ServerFnError::new(e.to_string()))?
        .with_timezone(&chrono::Utc);

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    sqlx::query(
        "INSERT INTO activities (lead_id, assigned_to_id, created_by_id, tipo, due_date, notes)
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(lead_uuid)
    .bind(assigned)
    .bind(user.id)
    .bind(draft.tipo)
    .bind(due)
    .bind(&draft.notes)
    .execute(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/activities/create")]
pub async fn create_activity(draft: ActivityDraft) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Mark an activity done or not done.
#[cfg(feature = "server")]
#[post("/api/activities/complete", session: tower_sessions::Session)]
pub async fn set_activity_completed(id: String, completed: bool) -> Result<(), ServerFnError> {
    use crate::db::get_pool;

    let user = current_app_user(&session).await?;
    require(&user, Capability::ViewCrm)?;

    let activity_id = parse_uuid(&id)?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    sqlx::query(
        "UPDATE activities SET is_completed = $1,
                completed_at = CASE WHEN $1 THEN NOW() ELSE NULL END
         WHERE id = $2",
    )
    .bind(completed)
    .bind(activity_id)
    .execute(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/activities/complete")]
pub async fn set_activity_completed(id: String, completed: bool) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Aggregate metrics for the selected reporting window.
#[cfg(feature = "server")]
#[get("/api/dashboard", session: tower_sessions::Session)]
pub async fn dashboard_metrics(periodo: Periodo) -> Result<DashboardData, ServerFnError> {
    use crate::db::get_pool;
    use crate::metrics::{compute_dashboard, periodo_start, LeadFacts};

    let user = current_app_user(&session).await?;
    require(&user, Capability::ViewCrm)?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let start = periodo_start(periodo, chrono::Utc::now());

    let rows: Vec<(
        chrono::DateTime<chrono::Utc>,
        LeadStatus,
        LeadOrigin,
        f64,
        Option<uuid::Uuid>,
    )> = sqlx::query_as(
        "SELECT created_at, status, origem, valor, responsavel_id FROM leads
         WHERE $1::timestamptz IS NULL OR created_at >= $1",
    )
    .bind(start)
    .fetch_all(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    let facts: Vec<LeadFacts> = rows
        .into_iter()
        .map(|(created_at, status, origem, valor, responsavel_id)| LeadFacts {
            created_at,
            status,
            origem,
            valor,
            responsavel_id,
        })
        .collect();

    let vendedores: Vec<(uuid::Uuid, String)> =
        sqlx::query_as("SELECT id, nome FROM app_users WHERE papel = 'vendedor' ORDER BY nome")
            .fetch_all(pool)
            .await
            .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(compute_dashboard(&facts, &vendedores))
}

#[cfg(not(feature = "server"))]
#[get("/api/dashboard")]
pub async fn dashboard_metrics(periodo: Periodo) -> Result<DashboardData, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}
