use anyhow::Result;
use menu_catalog::{Catalog, CatalogError};
use pretty_assertions::assert_eq;

#[test]
fn builtin_menu_loads_in_declaration_order() -> Result<()> {
    let catalog = Catalog::builtin()?;

    let ids: Vec<u32> = catalog.items().iter().map(|item| item.id).collect();
    assert_eq!(ids, (1..=10).collect::<Vec<_>>());

    let fallback = catalog.fallback();
    assert_eq!(fallback.id, 0);
    assert_eq!(fallback.name, "Chef's Special of the Day");
    assert!(fallback.keywords.is_empty());

    assert_eq!(
        catalog.categories(),
        vec!["spicy", "vegan", "family", "traditional", "fatcakes"]
    );
    Ok(())
}

#[test]
fn builtin_presets_resolve_for_every_category() -> Result<()> {
    let catalog = Catalog::builtin()?;

    assert_eq!(
        catalog.preset_query("spicy"),
        Some("I'm craving something spicy")
    );
    assert_eq!(
        catalog.preset_query("fatcakes"),
        Some("I'm in the mood for fat cakes")
    );
    assert_eq!(catalog.preset_query("special"), None);
    assert_eq!(catalog.preset_query("desserts"), None);
    Ok(())
}

#[test]
fn catalog_loads_from_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("menu.toml");
    std::fs::write(
        &path,
        r#"
        [fallback]
        id = 0
        name = "House Plate"
        description = "Whatever is fresh"
        price = 40
        category = "special"

        [[items]]
        id = 7
        name = "Pap & Stew"
        description = "Maize porridge with beef stew"
        price = 42.5
        keywords = ["pap", "stew"]
        category = "traditional"
        emoji = "🍲"
        "#,
    )?;

    let catalog = Catalog::from_path(&path)?;
    assert_eq!(catalog.len(), 1);
    let item = catalog.get(7).expect("item 7");
    assert_eq!(item.price, 42.5);
    assert_eq!(item.label, "🍲");
    assert!(catalog.presets().is_empty());
    Ok(())
}

#[test]
fn missing_file_reports_path() {
    let err = Catalog::from_path(std::path::Path::new("/definitely/not/here.toml")).unwrap_err();
    match err {
        CatalogError::Io { path, .. } => assert!(path.ends_with("here.toml")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn catalog_without_items_is_rejected() {
    let err = Catalog::from_toml_str(
        r#"
        [fallback]
        id = 0
        name = "House Plate"
        description = ""
        price = 40
        category = "special"
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, CatalogError::Empty));
}
