use camino::Utf8PathBuf;
use stepperblocks::field::{InstanceSelector, OptionsProvider};
use stepperblocks::generator::generate;
use stepperblocks::model::Workspace;

const WORKSPACE_JSON: &str = r#"{
  "blocks": [
    {
      "id": "cfg",
      "type": "stepper_configure",
      "fields": { "STEPPER_PIN1": "8", "STEPPER_PIN2": "9" },
      "inputs": {
        "STEPPER_NAME": { "id": "name", "type": "text", "fields": { "TEXT": "Pan" } },
        "STEPPER_SPEED": { "id": "speed", "type": "math_number", "fields": { "NUM": "30" } }
      },
      "next": {
        "id": "move",
        "type": "stepper_step",
        "fields": { "STEPPER_NAME": "Pan" },
        "inputs": {
          "STEPPER_STEPS": { "id": "n", "type": "math_number", "fields": { "NUM": "200" } }
        }
      }
    }
  ]
}"#;

#[test]
fn load_generate_and_render() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = Utf8PathBuf::from_path_buf(dir.path().join("workspace.json")).expect("utf8 path");
    std::fs::write(path.as_std_path(), WORKSPACE_JSON).expect("write workspace");

    let ws = Workspace::load_from_file(&path).expect("load workspace");
    assert_eq!(ws.all_blocks().len(), 5);

    let labels: Vec<String> = InstanceSelector::new(&ws).options().into_iter().map(|o| o.label).collect();
    assert_eq!(labels, vec!["Pan"]);

    let sketch = generate(&ws).sketch();
    let expected = "#include <Stepper.h>\n\
\n\
Stepper Pan(360, 8, 9);\n\
\n\
void setup() {\n  Pan.setSpeed(30);\n}\n\
\n\
void loop() {\n  Pan.steps(200);\n}\n";
    assert_eq!(sketch, expected);
}

#[test]
fn save_and_reload() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = Utf8PathBuf::from_path_buf(dir.path().join("copy.json")).expect("utf8 path");
    let ws = Workspace::from_json(WORKSPACE_JSON).expect("parse");
    ws.save_to_file(&path).expect("save");
    let reloaded = Workspace::load_from_file(&path).expect("reload");
    assert_eq!(reloaded.blocks, ws.blocks);
}

#[test]
fn malformed_workspace_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = Utf8PathBuf::from_path_buf(dir.path().join("bad.json")).expect("utf8 path");
    std::fs::write(path.as_std_path(), "{\"blocks\": [{\"type\": 1}]}").expect("write");
    let err = Workspace::load_from_file(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse workspace"));
}

#[test]
fn report_serializes_to_json() {
    let ws = Workspace::from_json(WORKSPACE_JSON).expect("parse");
    let value = serde_json::to_value(generate(&ws)).expect("serialize");
    assert_eq!(value["board"], "uno");
    assert_eq!(value["pins"]["8"], "STEPPER");
    assert_eq!(value["fragments"]["body"]["move"], "Pan.steps(200);");
    assert!(value["warnings"].as_object().expect("object").is_empty());
}
