//! Interactive console: a rustyline REPL over the session store, route guard
//! and API bindings. Every navigation command runs through the guard chain;
//! denials behave exactly like the web client (login redirect with a
//! remembered destination, silent redirect home on wrong role).

use std::sync::Arc;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::info;

use crate::api::{marketing, services, users};
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::gateway::Gateway;
use crate::guard::{Destination, GuardDecision, RouteGuard};
use crate::nav;
use crate::policy::{has_capability, Capability, Role, Screen};
use crate::session::{ProfilePatch, SessionStore, TokenCell, TokenFile};

use super::outputformatter::{print_page_info, print_table};

const PAGE_LIMIT: u32 = 15;

pub struct Console {
    gateway: Gateway,
    store: Arc<SessionStore>,
    guard: RouteGuard,
}

impl Console {
    pub fn new(config: &Config) -> AppResult<Self> {
        let tokens = TokenCell::new();
        let file = TokenFile::new(&config.token_file);
        let gateway = Gateway::new(config.api_base.clone(), tokens.clone())?;
        let store = Arc::new(SessionStore::new(tokens, file));
        Ok(Self { gateway, store, guard: RouteGuard::new() })
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        // Silent restore; a stale token just means logging in again.
        if let Err(e) = self.store.restore(&self.gateway).await {
            info!(target: "sakti", "no session restored: {}", e.message());
        }

        let mut rl = DefaultEditor::new()?;
        println!("SAKTI admin console — type 'help' for commands");
        loop {
            let prompt = match self.store.snapshot().user {
                Some(u) => format!("sakti({})> ", u.email),
                None => "sakti> ".to_string(),
            };
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(line);
                    if matches!(line, "exit" | "quit") {
                        break;
                    }
                    self.dispatch(line).await;
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(e) => {
                    eprintln!("readline error: {}", e);
                    break;
                }
            }
        }
        Ok(())
    }

    async fn dispatch(&self, line: &str) {
        let mut parts = line.split_whitespace();
        let cmd = parts.next().unwrap_or("");
        let args: Vec<&str> = parts.collect();
        let result = match cmd {
            "help" => {
                print_help();
                Ok(())
            }
            "login" => self.cmd_login(&args).await,
            "logout" => {
                self.store.logout();
                println!("signed out");
                Ok(())
            }
            "whoami" => self.cmd_whoami(),
            "menu" => self.cmd_menu(),
            "open" => self.cmd_open(args.first().copied().unwrap_or("")).await,
            "services" => self.cmd_services(&args).await,
            "service" => self.cmd_service_detail(&args).await,
            "rm-service" => self.cmd_rm_service(&args).await,
            "kits" => self.cmd_kits(&args).await,
            "download" => self.cmd_download(&args).await,
            "rm-kit" => self.cmd_rm_kit(&args).await,
            "users" => self.cmd_users(&args).await,
            "set-role" => self.cmd_set_role(&args).await,
            "units" => self.cmd_units().await,
            "requests" => self.cmd_requests().await,
            "approve" => self.cmd_review_request(&args, true).await,
            "reject" => self.cmd_review_request(&args, false).await,
            "resetpw" => self.cmd_resetpw(&args).await,
            "rename" => self.cmd_rename(&args).await,
            other => {
                println!("unknown command '{}'; try 'help'", other);
                Ok(())
            }
        };
        if let Err(e) = result {
            self.notify(&e);
        }
    }

    // Transient notification per error category; a rejected credential also
    // ends the session so the next navigation redirects to login.
    fn notify(&self, err: &AppError) {
        eprintln!("! {}", err.message());
        if err.is_unauthorized() {
            self.store.note_unauthorized();
        }
    }

    fn current_role(&self) -> Role {
        self.store.snapshot().user.map(|u| u.role).unwrap_or_default()
    }

    /// Guard-check a destination; prints the redirect outcome. Returns true
    /// when the caller may proceed to render.
    fn pass_guard(&self, dest: &Destination) -> bool {
        match self.guard.evaluate(&self.store.snapshot(), dest) {
            GuardDecision::Allow => true,
            GuardDecision::RedirectToLogin => {
                println!("please log in first (your destination {} is remembered)", dest.path);
                false
            }
            GuardDecision::RedirectToHome => {
                // Silent per design: a navigation decision, not an error
                println!("→ dashboard");
                false
            }
        }
    }

    async fn cmd_login(&self, args: &[&str]) -> AppResult<()> {
        let (email, password) = match args {
            [e, p] => (*e, *p),
            _ => {
                println!("usage: login <email> <password>");
                return Ok(());
            }
        };
        let profile = self.store.login(&self.gateway, email, password).await?;
        println!("welcome, {} ({})", profile.name, profile.role.as_str());
        // Return to the destination that originally bounced to login
        if let Some(dest) = self.guard.take_remembered() {
            self.render_destination(&dest).await?;
        } else {
            self.render_screen(Screen::Dashboard).await?;
        }
        Ok(())
    }

    fn cmd_whoami(&self) -> AppResult<()> {
        match self.store.snapshot().user {
            Some(u) => {
                println!("{} <{}> role={}", u.name, u.email, u.role.as_str());
                if let Some(unit) = u.unit {
                    println!("unit: {} (#{})", unit.name, unit.id);
                }
            }
            None => println!("not signed in"),
        }
        Ok(())
    }

    fn cmd_menu(&self) -> AppResult<()> {
        let entries = nav::visible_entries(self.current_role());
        if entries.is_empty() {
            println!("no menu (not signed in?)");
            return Ok(());
        }
        for e in entries {
            println!("  {:<16} {}", e.screen.id(), e.label);
        }
        Ok(())
    }

    async fn cmd_open(&self, target: &str) -> AppResult<()> {
        let Some(dest) = parse_destination(target) else {
            println!("unknown screen '{}'; use a menu id or a path like /service/42", target);
            return Ok(());
        };
        self.render_destination(&dest).await
    }

    async fn render_destination(&self, dest: &Destination) -> AppResult<()> {
        if !self.pass_guard(dest) {
            return Ok(());
        }
        // Detail routes render the single resource, everything else the screen
        if let Some(id) = service_detail_id(&dest.path) {
            let svc = services::detail(&self.gateway, id).await?;
            print_service(&svc);
            return Ok(());
        }
        self.render_screen(dest.screen).await
    }

    async fn render_screen(&self, screen: Screen) -> AppResult<()> {
        match screen {
            Screen::Dashboard => {
                println!("== Dashboard ==");
                self.cmd_menu()
            }
            Screen::ServiceCatalog | Screen::ServiceEditor => self.cmd_services(&[]).await,
            Screen::MarketingKit => self.cmd_kits(&[]).await,
            Screen::AdminPanel => self.cmd_users(&[]).await,
            Screen::ProfileEditor => self.cmd_whoami(),
        }
    }

    async fn cmd_services(&self, args: &[&str]) -> AppResult<()> {
        if !self.pass_guard(&Destination::screen(Screen::ServiceCatalog)) {
            return Ok(());
        }
        let page = args.first().and_then(|p| p.parse().ok()).unwrap_or(1);
        let search = args.get(1).copied();
        let list = services::list(&self.gateway, page, PAGE_LIMIT, search).await?;
        let rows: Vec<Vec<String>> = list
            .data
            .iter()
            .map(|s| {
                vec![
                    s.id.to_string(),
                    s.name.clone(),
                    s.portfolio.as_ref().map(|p| p.name.clone()).unwrap_or_default(),
                    s.sector.as_ref().map(|p| p.name.clone()).unwrap_or_default(),
                ]
            })
            .collect();
        print_table(&["id", "name", "portfolio", "sector"], &rows);
        print_page_info(list.pagination.current_page, list.pagination.total_pages);
        Ok(())
    }

    async fn cmd_service_detail(&self, args: &[&str]) -> AppResult<()> {
        let Some(id) = args.first().and_then(|a| a.parse::<i64>().ok()) else {
            println!("usage: service <id>");
            return Ok(());
        };
        self.render_destination(&Destination::detail(Screen::ServiceCatalog, format!("/service/{}", id)))
            .await
    }

    async fn cmd_rm_service(&self, args: &[&str]) -> AppResult<()> {
        if !has_capability(self.current_role(), Capability::EditService) {
            println!("your role cannot edit services");
            return Ok(());
        }
        let Some(id) = args.first().and_then(|a| a.parse::<i64>().ok()) else {
            println!("usage: rm-service <id>");
            return Ok(());
        };
        services::remove(&self.gateway, id).await?;
        println!("service {} deleted", id);
        Ok(())
    }

    async fn cmd_kits(&self, args: &[&str]) -> AppResult<()> {
        if !self.pass_guard(&Destination::screen(Screen::MarketingKit)) {
            return Ok(());
        }
        let page = args.first().and_then(|p| p.parse().ok()).unwrap_or(1);
        let list = marketing::list(&self.gateway, page, PAGE_LIMIT, None).await?;
        let rows: Vec<Vec<String>> = list
            .data
            .iter()
            .map(|k| {
                vec![
                    k.id.to_string(),
                    k.title.clone(),
                    k.file_name.clone().unwrap_or_default(),
                ]
            })
            .collect();
        print_table(&["id", "title", "file"], &rows);
        print_page_info(list.pagination.current_page, list.pagination.total_pages);
        Ok(())
    }

    async fn cmd_download(&self, args: &[&str]) -> AppResult<()> {
        if !self.pass_guard(&Destination::screen(Screen::MarketingKit)) {
            return Ok(());
        }
        let Some(id) = args.first().and_then(|a| a.parse::<i64>().ok()) else {
            println!("usage: download <kit-id>");
            return Ok(());
        };
        let url = marketing::download_url(&self.gateway, id).await?;
        println!("file location: {}", url);
        Ok(())
    }

    async fn cmd_rm_kit(&self, args: &[&str]) -> AppResult<()> {
        if !has_capability(self.current_role(), Capability::DeleteMarketingKit) {
            println!("your role cannot delete marketing kits");
            return Ok(());
        }
        let Some(id) = args.first().and_then(|a| a.parse::<i64>().ok()) else {
            println!("usage: rm-kit <id>");
            return Ok(());
        };
        marketing::remove(&self.gateway, id).await?;
        println!("marketing kit {} deleted", id);
        Ok(())
    }

    async fn cmd_users(&self, args: &[&str]) -> AppResult<()> {
        if !self.pass_guard(&Destination::screen(Screen::AdminPanel)) {
            return Ok(());
        }
        let page = args.first().and_then(|p| p.parse().ok()).unwrap_or(1);
        let search = args.get(1).copied();
        let list = users::list(&self.gateway, page, PAGE_LIMIT, search).await?;
        let rows: Vec<Vec<String>> = list
            .data
            .iter()
            .map(|u| {
                vec![
                    u.id.to_string(),
                    u.name.clone(),
                    u.email.clone(),
                    u.role.as_str().to_string(),
                ]
            })
            .collect();
        print_table(&["id", "name", "email", "role"], &rows);
        print_page_info(list.pagination.current_page, list.pagination.total_pages);
        Ok(())
    }

    async fn cmd_set_role(&self, args: &[&str]) -> AppResult<()> {
        if !has_capability(self.current_role(), Capability::ManageRoles) {
            println!("your role cannot assign roles");
            return Ok(());
        }
        let (Some(id), Some(role_str)) = (args.first(), args.get(1)) else {
            println!("usage: set-role <user-id> <admin|management|pdo|viewer>");
            return Ok(());
        };
        let Ok(id) = id.parse::<i64>() else {
            println!("usage: set-role <user-id> <role>");
            return Ok(());
        };
        let Some(role) = Role::ALL.iter().copied().find(|r| r.as_str() == *role_str) else {
            println!("unknown role '{}'", role_str);
            return Ok(());
        };
        let updated = users::assign_role(&self.gateway, id, role).await?;
        println!("{} is now {}", updated.email, updated.role.as_str());
        Ok(())
    }

    async fn cmd_units(&self) -> AppResult<()> {
        if !self.pass_guard(&Destination::screen(Screen::AdminPanel)) {
            return Ok(());
        }
        let list = users::units(&self.gateway).await?;
        let rows: Vec<Vec<String>> = list
            .iter()
            .map(|u| vec![u.id.to_string(), u.name.clone()])
            .collect();
        print_table(&["id", "unit"], &rows);
        Ok(())
    }

    async fn cmd_requests(&self) -> AppResult<()> {
        if !self.pass_guard(&Destination::screen(Screen::AdminPanel)) {
            return Ok(());
        }
        let list = users::unit_change_requests(&self.gateway, 1, PAGE_LIMIT).await?;
        let rows: Vec<Vec<String>> = list
            .data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.user_id.to_string(),
                    r.requested_unit_id.to_string(),
                    format!("{:?}", r.status).to_lowercase(),
                ]
            })
            .collect();
        print_table(&["id", "user", "unit", "status"], &rows);
        Ok(())
    }

    async fn cmd_review_request(&self, args: &[&str], approve: bool) -> AppResult<()> {
        if !has_capability(self.current_role(), Capability::ReviewUnitChanges) {
            println!("your role cannot review unit-change requests");
            return Ok(());
        }
        let Some(id) = args.first().and_then(|a| a.parse::<i64>().ok()) else {
            println!("usage: {} <request-id>", if approve { "approve" } else { "reject" });
            return Ok(());
        };
        let req = if approve {
            users::approve_unit_change(&self.gateway, id).await?
        } else {
            users::reject_unit_change(&self.gateway, id).await?
        };
        println!("request {} is now {:?}", req.id, req.status);
        Ok(())
    }

    async fn cmd_resetpw(&self, args: &[&str]) -> AppResult<()> {
        let Some(email) = args.first() else {
            println!("usage: resetpw <email>");
            return Ok(());
        };
        // Unauthenticated callers allowed; the gateway sends no bearer header
        // when there is no session.
        users::reset_password(&self.gateway, email).await?;
        println!("reset mail requested for {}", email);
        Ok(())
    }

    async fn cmd_rename(&self, args: &[&str]) -> AppResult<()> {
        if !self.pass_guard(&Destination::screen(Screen::ProfileEditor)) {
            return Ok(());
        }
        if args.is_empty() {
            println!("usage: rename <new display name>");
            return Ok(());
        }
        let name = args.join(" ");
        // Confirmed backend write first, then the local optimistic merge
        let _: serde_json::Value = self
            .gateway
            .put("/auth/profile", &serde_json::json!({ "name": name }))
            .await?;
        self.store.update_profile(&ProfilePatch { name: Some(name.clone()), ..Default::default() });
        println!("display name updated to '{}'", name);
        Ok(())
    }
}

/// Map user input to a destination: either a menu id (`marketing-kit`) or a
/// route path (`/service/42`).
fn parse_destination(input: &str) -> Option<Destination> {
    if let Some(screen) = Screen::from_id(input) {
        return Some(Destination::screen(screen));
    }
    if service_detail_id(input).is_some() {
        return Some(Destination::detail(Screen::ServiceCatalog, input));
    }
    Screen::ALL
        .iter()
        .find(|s| s.path() == input)
        .map(|s| Destination::screen(*s))
}

fn service_detail_id(path: &str) -> Option<i64> {
    path.strip_prefix("/service/")?.parse().ok()
}

fn print_service(svc: &crate::api::models::Service) {
    println!("#{} {}", svc.id, svc.name);
    if let Some(d) = &svc.description {
        println!("  {}", d);
    }
    if let Some(p) = &svc.portfolio {
        println!("  portfolio: {}", p.name);
    }
    if let Some(s) = &svc.sector {
        println!("  sector: {}", s.name);
    }
}

fn print_help() {
    println!("session:    login <email> <pass> | logout | whoami | resetpw <email>");
    println!("navigate:   menu | open <screen-id|path>");
    println!("services:   services [page] [search] | service <id> | rm-service <id>");
    println!("marketing:  kits [page] | download <id> | rm-kit <id>");
    println!("admin:      users [page] [search] | set-role <id> <role> | units");
    println!("            requests | approve <id> | reject <id>");
    println!("profile:    rename <name>");
    println!("exit:       quit");
}
