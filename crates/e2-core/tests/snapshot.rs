//! JSON shape of the state snapshot.

mod common;

use e2_model::PresetId;

use common::Export;

#[test]
fn snapshot_after_preview_program_preview() {
    let export = Export::standard();
    let mut presets = export.load();
    presets.activate_preview(PresetId::new(1).unwrap()).unwrap();
    presets.activate_program().unwrap();
    presets.activate_preview(PresetId::new(3).unwrap()).unwrap();

    let json = serde_json::to_string_pretty(&presets.snapshot()).unwrap();
    insta::assert_snapshot!(json, @r#"
    {
      "active": 3,
      "groups": [
        {
          "title": null,
          "presets": [
            3
          ]
        },
        {
          "title": "Show1",
          "presets": [
            2,
            1
          ]
        }
      ],
      "destinations": [
        {
          "outputs": [
            1,
            2
          ],
          "title": "Main",
          "preview": 1,
          "program": 1
        },
        {
          "outputs": [
            3
          ],
          "title": "Stage",
          "preview": 1,
          "program": 1
        },
        {
          "outputs": [
            4
          ],
          "title": "Monitor",
          "preview": 3,
          "program": null
        }
      ],
      "presets": [
        {
          "preset": 1,
          "title": "Wide",
          "group": "Show1",
          "destinations": [
            [
              3
            ],
            [
              1,
              2
            ]
          ],
          "active": false,
          "preview": false,
          "program": true
        },
        {
          "preset": 2,
          "title": "Tight",
          "group": "Show1",
          "destinations": [
            [
              3
            ]
          ],
          "active": false,
          "preview": false,
          "program": false
        },
        {
          "preset": 3,
          "title": "Black",
          "group": null,
          "destinations": [
            [
              4
            ]
          ],
          "active": true,
          "preview": true,
          "program": false
        }
      ]
    }
    "#);
}
