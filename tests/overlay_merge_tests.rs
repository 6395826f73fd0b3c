#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::docs::PET_STORE_YAML;
use specgen::{
    ordinals, CodegenSettings, ConfigOverlay, IdentifierResolver, LayeredConfig, SpecInputModel,
    SpecReference,
};

fn pet_store_model(settings: &CodegenSettings) -> SpecInputModel {
    SpecInputModel::builder()
        .filename("petstore.yaml")
        .content(PET_STORE_YAML)
        .base_package("org.acme.petstore")
        .skip_form_model(false)
        .build(settings)
        .unwrap()
}

#[test]
fn test_overlay_carries_model_properties_at_lowest_ordinal() {
    let settings = CodegenSettings::default();
    let model = pet_store_model(&settings);
    let overlay = ConfigOverlay::from_model(&model);

    assert_eq!(overlay.len(), 2);
    assert_eq!(overlay.ordinal(), ordinals::SPEC_OVERLAY);
    for other in [
        ordinals::DEFAULTS,
        ordinals::APPLICATION,
        ordinals::ENVIRONMENT,
        ordinals::COMMAND_LINE,
    ] {
        assert!(overlay.ordinal() < other);
    }
    let keys: Vec<_> = overlay.iter().map(|e| e.key.as_str()).collect();
    let mut sorted = keys.clone();
    sorted.sort_unstable();
    assert_eq!(keys, sorted);
}

#[test]
fn test_explicit_setting_wins_over_overlay() {
    let settings = CodegenSettings::default();
    let model = pet_store_model(&settings);
    let keys = IdentifierResolver::new(&settings)
        .resolve(&SpecReference::inline("petstore.yaml", PET_STORE_YAML))
        .unwrap()
        .keys;

    let user = ConfigOverlay::new("application.toml", ordinals::APPLICATION)
        .with_entry(keys.base_package(), "com.example.explicit");

    // Order of insertion must not matter; the ordinal decides.
    for config in [
        LayeredConfig::new()
            .with_layer(ConfigOverlay::from_model(&model))
            .with_layer(user.clone()),
        LayeredConfig::new()
            .with_layer(user.clone())
            .with_layer(ConfigOverlay::from_model(&model)),
    ] {
        let options = config.codegen_options(&keys).unwrap().unwrap();
        assert_eq!(options.base_package, "com.example.explicit");
        assert_eq!(options.api_package, "com.example.explicit.api");
        assert_eq!(options.model_package, "com.example.explicit.model");
        assert!(!options.skip_form_model);
    }
}

#[test]
fn test_overlay_fills_in_when_user_is_silent() {
    let settings = CodegenSettings::default();
    let model = pet_store_model(&settings);
    let keys = IdentifierResolver::new(&settings).keys_for(model.identifier());

    let user = ConfigOverlay::from_toml_str(
        "application.toml",
        "[quarkus.openapi-generator.codegen.spec.petstore_yaml]\nskip-form-model = true\n",
        ordinals::APPLICATION,
    )
    .unwrap();
    let config = LayeredConfig::new()
        .with_layer(ConfigOverlay::from_model(&model))
        .with_layer(user);

    let options = config.codegen_options(&keys).unwrap().unwrap();
    assert_eq!(options.base_package, "org.acme.petstore");
    assert!(options.skip_form_model);
}

#[test]
fn test_environment_layer_beats_file_layer() {
    let file = ConfigOverlay::from_toml_str(
        "application.toml",
        "[quarkus.openapi-generator.codegen]\nuseTitleAsId = false\n",
        ordinals::APPLICATION,
    )
    .unwrap();
    let env = ConfigOverlay::from_env_vars(
        "SPECGEN_",
        vec![(
            "SPECGEN_QUARKUS_OPENAPI_GENERATOR_CODEGEN_USETITLEASID".to_string(),
            "true".to_string(),
        )],
        ordinals::ENVIRONMENT,
    );
    let config = LayeredConfig::new().with_layer(env).with_layer(file);

    let settings =
        CodegenSettings::from_layers(&config, "quarkus.openapi-generator.codegen").unwrap();
    assert!(settings.use_title_as_id);

    let model = pet_store_model(&settings);
    assert_eq!(model.filename(), "Pet_Store");
    let overlay = ConfigOverlay::from_model(&model);
    assert_eq!(
        overlay.get("quarkus.openapi-generator.codegen.spec.Pet_Store.base-package"),
        Some("org.acme.Pet_Store")
    );
    assert_eq!(
        overlay.get("quarkus.openapi-generator.codegen.spec.Pet_Store.skip-form-model"),
        Some("false")
    );
}
