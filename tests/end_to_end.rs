//! End-to-end runs: spec file or HTTP endpoint in, declaration files out.

use std::fs;

use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use oapi_dto_generator::{Config, DtoGenError, Mode, Pipeline, SpecSource};

const USER_PROFILE_SPEC: &str = r#"
swagger: '2.0'
info:
  title: Users
definitions:
  user-profile:
    type: object
    properties:
      id:
        type: string
      nickname:
        type: string
        nullable: true
"#;

const SHOP_SPEC: &str = r#"
swagger: '2.0'
definitions:
  order:
    type: object
    title: Order
    required: [id]
    properties:
      id: {type: integer}
      customer: {$ref: '#/definitions/user-profile'}
      lines:
        type: array
        items: {$ref: '#/definitions/order_line'}
      discount:
        x-nullable: true
        allOf:
          - $ref: '#/definitions/Discount'
  order_line:
    type: object
    properties:
      sku: {type: string}
      quantity: {type: integer}
  discount:
    type: object
    properties:
      percent: {type: number}
  user-profile:
    type: object
    properties:
      id: {type: string}
      nickname: {type: string, nullable: true}
"#;

fn config(temp_dir: &TempDir, spec: &str, mode: Mode) -> Config {
    let spec_path = temp_dir.path().join("swagger.yaml");
    fs::write(&spec_path, spec).unwrap();
    Config {
        dest: temp_dir.path().join("dto-spec"),
        ..Config::new(SpecSource::File(spec_path), mode)
    }
}

#[tokio::test]
async fn read_mode_user_profile() {
    let temp_dir = TempDir::new().unwrap();
    let config = config(&temp_dir, USER_PROFILE_SPEC, Mode::Read);
    let dest = config.dest.clone();

    let declarations = Pipeline::new(config).run().await.unwrap();

    assert_eq!(declarations.len(), 1);
    assert_eq!(declarations[0].type_name, "UserProfileDtoRead");
    let content = fs::read_to_string(dest.join("UserProfileDtoRead.js.flow")).unwrap();
    assert_eq!(
        content,
        "// @flow\n\
         \n\
         export type UserProfileDtoRead = {\n  id: string,\n  nickname: null | string,\n};\n"
    );
}

#[tokio::test]
async fn write_mode_user_profile() {
    let temp_dir = TempDir::new().unwrap();
    let config = config(&temp_dir, USER_PROFILE_SPEC, Mode::Write);
    let dest = config.dest.clone();

    Pipeline::new(config).run().await.unwrap();

    let content = fs::read_to_string(dest.join("UserProfileDtoWrite.js.flow")).unwrap();
    assert_eq!(
        content,
        "// @flow\n\
         \n\
         export type UserProfileDtoWrite = {\n  id?: string,\n  nickname?: null | string,\n};\n"
    );
}

#[test]
fn prepared_schemas_match_mode_rules() {
    let definitions = oapi_dto_generator::loader::decode_definitions(USER_PROFILE_SPEC).unwrap();

    let read = Pipeline::new(Config::new(SpecSource::parse("swagger.yaml"), Mode::Read))
        .prepare(&definitions)
        .unwrap();
    let profile = &read["UserProfileDtoRead"];
    assert_eq!(profile.required, Some(vec!["id".to_owned()]));
    assert!(profile.properties.as_ref().unwrap()["nickname"].is_null_union());

    let write = Pipeline::new(Config::new(SpecSource::parse("swagger.yaml"), Mode::Write))
        .prepare(&definitions)
        .unwrap();
    let profile = &write["UserProfileDtoWrite"];
    assert_eq!(profile.required, Some(vec![]));
    let properties = profile.properties.as_ref().unwrap();
    assert!(properties["nickname"].is_null_union());
    assert!(!properties["id"].is_null_union());
}

#[tokio::test]
async fn cross_references_become_imports() {
    let temp_dir = TempDir::new().unwrap();
    let config = config(&temp_dir, SHOP_SPEC, Mode::Read);
    let dest = config.dest.clone();

    let declarations = Pipeline::new(config).run().await.unwrap();

    let names: Vec<_> = declarations.iter().map(|d| d.type_name.as_str()).collect();
    assert_eq!(
        names,
        vec!["OrderDtoRead", "OrderLineDtoRead", "DiscountDtoRead", "UserProfileDtoRead"]
    );

    let order = fs::read_to_string(dest.join("OrderDtoRead.js.flow")).unwrap();
    assert_eq!(
        order,
        "// @flow\n\
         import type { UserProfileDtoRead } from './UserProfileDtoRead.js.flow';\n\
         import type { OrderLineDtoRead } from './OrderLineDtoRead.js.flow';\n\
         import type { DiscountDtoRead } from './DiscountDtoRead.js.flow';\n\
         \n\
         export type OrderDtoRead = {\n  \
         id: number,\n  \
         customer: UserProfileDtoRead,\n  \
         lines: Array<OrderLineDtoRead>,\n  \
         discount: null | DiscountDtoRead,\n\
         };\n"
    );

    for declaration in &declarations {
        assert!(dest.join(&declaration.file_name).is_file());
    }
}

#[tokio::test]
async fn existing_output_directory_is_reused() {
    let temp_dir = TempDir::new().unwrap();
    let config = config(&temp_dir, USER_PROFILE_SPEC, Mode::Write);
    fs::create_dir(&config.dest).unwrap();
    fs::write(config.dest.join("Stale.js.flow"), "old").unwrap();
    let dest = config.dest.clone();

    Pipeline::new(config).run().await.unwrap();

    assert!(dest.join("UserProfileDtoWrite.js.flow").is_file());
    assert!(dest.join("Stale.js.flow").is_file());
}

#[tokio::test]
async fn dry_run_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = config(&temp_dir, USER_PROFILE_SPEC, Mode::Read);
    config.dry_run = true;
    let dest = config.dest.clone();

    let declarations = Pipeline::new(config).run().await.unwrap();

    assert_eq!(declarations.len(), 1);
    assert!(!dest.exists());
}

#[tokio::test]
async fn spec_is_fetched_over_http() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/swagger.yaml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(USER_PROFILE_SPEC))
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let config = Config {
        dest: temp_dir.path().join("dto-spec"),
        ..Config::new(
            SpecSource::parse(&format!("{}/swagger.yaml", mock_server.uri())),
            Mode::Read,
        )
    };
    let dest = config.dest.clone();

    Pipeline::new(config).run().await.unwrap();

    assert!(dest.join("UserProfileDtoRead.js.flow").is_file());
}

#[tokio::test]
async fn http_error_status_is_fatal() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/swagger.yaml"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let config = Config {
        dest: temp_dir.path().join("dto-spec"),
        ..Config::new(
            SpecSource::parse(&format!("{}/swagger.yaml", mock_server.uri())),
            Mode::Read,
        )
    };
    let dest = config.dest.clone();

    let err = Pipeline::new(config).run().await.unwrap_err();

    assert!(matches!(err, DtoGenError::HttpStatus { status: 404, .. }));
    assert!(!dest.exists());
}

#[tokio::test]
async fn undecodable_spec_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let config = config(&temp_dir, "definitions: [", Mode::Read);
    let dest = config.dest.clone();

    let err = Pipeline::new(config).run().await.unwrap_err();

    assert!(matches!(err, DtoGenError::Decode(_)));
    assert!(!dest.exists());
}
