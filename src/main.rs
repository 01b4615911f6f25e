//! Demo del toolkit: actúa como aplicación anfitriona que sólo invoca los
//! contratos. Las variantes salen de `AppConfig` (entorno / .env).

use forge_core::{AsyncSingletonHandle, KitError, StepBuilder};
use forge_domain::{DatabaseVariant, EmailBuilder, StrictEmailBuilder};
use forge_kit::{AppConfig, AppError, Toolkit};
use serde_json::{json, to_string_pretty};

/// Snapshot de configuración compartido por toda la demo.
async fn load_config(settings: &AsyncSingletonHandle<AppConfig>) -> Result<AppConfig, AppError> {
    let cfg = settings.try_get(|| async {
                          tokio::task::spawn_blocking(AppConfig::from_env).await
                                                                          .map_err(|e| KitError::creation("config", e.to_string()))
                      })
                      .await?;
    Ok((*cfg).clone())
}

fn demo_factory(toolkit: &Toolkit) {
    println!("== ProductFactory");
    for variant in toolkit.walls().variants() {
        match toolkit.walls().create(variant) {
            Ok(wall) => println!("  {variant}: {wall}"),
            Err(e) => println!("  {variant}: {e}"),
        }
    }
}

fn demo_family(toolkit: &Toolkit) {
    println!("== FamilyFactory");
    for variant in DatabaseVariant::all() {
        match toolkit.databases().create_family(variant.as_str()) {
            Ok(kit) => println!("  {variant}: {}", kit.run("SELECT 1")),
            Err(e) => println!("  {variant}: {e}"),
        }
    }
}

fn demo_builder() -> Result<(), AppError> {
    println!("== StepBuilder");
    let mut builder = EmailBuilder::new();
    builder.from("ops@example.com")
           .to(["team@example.com"])
           .subject("Release notes")
           .header("X-Release", "1.0");
    let first = builder.build()?;
    let second = builder.build()?;
    println!("  {first}");
    println!("  equal fields: {}, distinct ids: {}", first == second, first.id() != second.id());

    let mut strict = StrictEmailBuilder::new();
    strict.from("ops@example.com").to(["broken-address"]);
    if let Err(e) = strict.build() {
        println!("  strict variant rejected: {e}");
    }

    let mut incomplete = EmailBuilder::new();
    incomplete.subject("orphan");
    if let Err(e) = incomplete.build() {
        println!("  incomplete builder: {e}");
    }
    Ok(())
}

fn demo_prototype(toolkit: &Toolkit) -> Result<(), AppError> {
    println!("== PrototypeRegistry");
    let registry = toolkit.templates();
    println!("  templates: {:?}", registry.names());
    let mut report = registry.clone_of("report")?;
    report.add_paragraph("summary", "Revenue up 4%");
    report.set_meta("author", json!("demo"));
    let pristine = registry.clone_of("report")?;
    println!("  modified copy:\n{}", to_string_pretty(&report)?);
    println!("  template untouched: {}", pristine.sections["summary"].len() == 1);
    if let Err(e) = registry.clone_of("does-not-exist") {
        println!("  {e}");
    }
    Ok(())
}

fn demo_singleton(toolkit: &Toolkit) {
    println!("== SingletonHandle");
    println!("  state before: {:?}", toolkit.pool().state());
    let service = toolkit.query_service();
    println!("  {}", service.run("SELECT * FROM users"));
    println!("  {}", toolkit.query_service().run("SELECT * FROM orders"));
    let pool = toolkit.pool().get();
    println!("  state after: {:?}, leases: {}", toolkit.pool().state(), pool.leases());
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let settings = AsyncSingletonHandle::new();
    let config = load_config(&settings).await?;
    println!("config: {}", serde_json::to_string(&config)?);

    let toolkit = Toolkit::from_config(config)?;
    demo_factory(&toolkit);
    demo_family(&toolkit);
    demo_builder()?;
    demo_prototype(&toolkit)?;
    demo_singleton(&toolkit);
    Ok(())
}
