//! Application Startup
//!
//! Service wiring, application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;

use crate::application::services::{
    AuthService, AuthServiceImpl, CompanyDirectory, CompanyService, CompanyServiceImpl, InviteService,
    InviteServiceImpl, ProjectService, ProjectServiceImpl, RepresentativeService, RepresentativeServiceImpl,
    StudentService, StudentServiceImpl, UserService, UserServiceImpl,
};
use crate::config::{Settings, StorageBackend};
use crate::domain::{
    CompanyRepository, InviteLinkRepository, ProjectRepository, RepresentativeRepository, StudentRepository,
    UserRepository,
};
use crate::infrastructure::database;
use crate::infrastructure::memory::{
    MemoryCompanyRepository, MemoryInviteLinkRepository, MemoryProjectRepository, MemoryRepresentativeRepository,
    MemoryStore, MemoryStudentRepository, MemoryUserRepository,
};
use crate::infrastructure::repositories::{
    PgCompanyRepository, PgInviteLinkRepository, PgProjectRepository, PgRepresentativeRepository,
    PgStudentRepository, PgUserRepository,
};
use crate::infrastructure::storage::{LocalResumeStorage, ResumeStorage};
use crate::presentation::http::{handlers::health, routes};
use crate::presentation::middleware::{cors, logging};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Present with the PostgreSQL backend
    pub db: Option<PgPool>,
    pub settings: Arc<Settings>,
    pub auth_service: Arc<dyn AuthService>,
    pub student_service: Arc<dyn StudentService>,
    pub company_service: Arc<dyn CompanyService>,
    pub representative_service: Arc<dyn RepresentativeService>,
    pub project_service: Arc<dyn ProjectService>,
    pub invite_service: Arc<dyn InviteService>,
}

impl AppState {
    /// Wire services over the configured storage backend.
    ///
    /// `db` is required for the PostgreSQL backend and ignored otherwise.
    pub fn new(settings: Settings, db: Option<PgPool>) -> Result<Self> {
        let resumes: Arc<dyn ResumeStorage> = Arc::new(LocalResumeStorage::new(&settings.uploads.resume_dir));

        match settings.storage.backend {
            StorageBackend::Postgres => {
                let pool = db.context("PostgreSQL backend selected without a connection pool")?;
                let repos = Repositories {
                    users: PgUserRepository::new(pool.clone()),
                    students: PgStudentRepository::new(pool.clone()),
                    companies: PgCompanyRepository::new(pool.clone()),
                    representatives: PgRepresentativeRepository::new(pool.clone()),
                    projects: PgProjectRepository::new(pool.clone()),
                    invite_links: PgInviteLinkRepository::new(pool.clone()),
                };
                Ok(build_services(repos, resumes, settings, Some(pool)))
            }
            StorageBackend::Memory => {
                let store = MemoryStore::new();
                let repos = Repositories {
                    users: MemoryUserRepository::new(store.clone()),
                    students: MemoryStudentRepository::new(store.clone()),
                    companies: MemoryCompanyRepository::new(store.clone()),
                    representatives: MemoryRepresentativeRepository::new(store.clone()),
                    projects: MemoryProjectRepository::new(store.clone()),
                    invite_links: MemoryInviteLinkRepository::new(store),
                };
                Ok(build_services(repos, resumes, settings, None))
            }
        }
    }
}

/// One repository per aggregate, all over the same backend
struct Repositories<U, S, C, R, P, I> {
    users: U,
    students: S,
    companies: C,
    representatives: R,
    projects: P,
    invite_links: I,
}

fn build_services<U, S, C, R, P, I>(
    repos: Repositories<U, S, C, R, P, I>,
    resumes: Arc<dyn ResumeStorage>,
    settings: Settings,
    db: Option<PgPool>,
) -> AppState
where
    U: UserRepository + 'static,
    S: StudentRepository + 'static,
    C: CompanyRepository + 'static,
    R: RepresentativeRepository + 'static,
    P: ProjectRepository + 'static,
    I: InviteLinkRepository + 'static,
{
    let representatives = Arc::new(repos.representatives);

    let users: Arc<dyn UserService> = Arc::new(UserServiceImpl::new(Arc::new(repos.users)));
    let companies = Arc::new(CompanyServiceImpl::new(Arc::new(repos.companies), users.clone()));
    let directory: Arc<dyn CompanyDirectory> = companies.clone();

    let invite_service = InviteServiceImpl::new(
        Arc::new(repos.invite_links),
        representatives.clone(),
        directory.clone(),
        users.clone(),
        settings.invite.url_template(),
        settings.invite.validity(),
    );

    AppState {
        db,
        auth_service: Arc::new(AuthServiceImpl::new(users.clone(), settings.jwt.clone())),
        student_service: Arc::new(StudentServiceImpl::new(Arc::new(repos.students), users.clone(), resumes)),
        representative_service: Arc::new(RepresentativeServiceImpl::new(
            representatives.clone(),
            directory,
            users,
        )),
        project_service: Arc::new(ProjectServiceImpl::new(Arc::new(repos.projects), representatives)),
        invite_service: Arc::new(invite_service),
        company_service: companies,
        settings: Arc::new(settings),
    }
}

/// Full router with tracing, metrics and CORS layers
pub fn build_router(state: AppState) -> Router {
    let cors = cors::create_cors_layer(&state.settings.cors);

    routes::create_router(state)
        .layer(logging::create_trace_layer())
        .layer(cors)
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        health::init_server_start();

        let db = match settings.storage.backend {
            StorageBackend::Postgres => {
                let pool = database::create_pool(&settings.database).await?;
                tracing::info!("Database connection pool created");

                if settings.database.run_migrations {
                    database::run_migrations(&pool).await?;
                    tracing::info!("Database migrations applied");
                }
                Some(pool)
            }
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage; data is lost on shutdown");
                None
            }
        };

        let addr = settings.server_addr();
        let state = AppState::new(settings, db)?;
        let router = build_router(state);

        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        tracing::info!("Listening on {}", listener.local_addr()?);

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router).await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}
