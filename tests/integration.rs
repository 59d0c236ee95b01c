//! Integration tests for convroute
//!
//! End-to-end tests covering catalog loading, graph building, snapshots and searching.
//!
mod common;
use common::*;
use convroute::catalog::FormatCache;
use convroute::prelude::*;
use std::fs;

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn test_format_cache_parsing() {
        let catalog = Catalog::from_json(FORMAT_CACHE_JSON).expect("Failed to parse cache");

        assert_eq!(catalog.len(), 2);
        let trace = catalog.handler("svgTrace").unwrap();
        assert_eq!(trace.formats.len(), 2);
        assert_eq!(trace.formats[0].categories, vec!["image"]);
        assert_eq!(
            trace.formats[1].categories,
            vec!["image", "vector", "document"]
        );
        assert!(trace.formats[0].accepts_input);
        assert!(!trace.formats[0].produces_output);
        assert!(!trace.formats[1].lossless);

        let ico = catalog.handler("icoWriter").unwrap();
        assert!(ico.formats[1].lossless);
        assert_eq!(ico.formats[1].mime, "image/x-icon");
    }

    #[test]
    fn test_format_cache_defers_validation() {
        let raw = FormatCache::from_json(r#"[["", []]]"#).expect("shape is valid");
        assert_eq!(
            raw.into_catalog(),
            Err(CatalogError::EmptyHandlerName { position: 0 })
        );
    }

    #[test]
    fn test_format_cache_rejects_bad_input() {
        assert!(matches!(
            Catalog::from_json("{ not json"),
            Err(CatalogError::JsonParseError(_))
        ));
        assert!(matches!(
            Catalog::from_json(r#"[["dup", []], ["dup", []]]"#),
            Err(CatalogError::DuplicateHandler { .. })
        ));
        assert!(matches!(
            Catalog::from_json(r#"[["h", [{"name": "x", "from": true}]]]"#),
            Err(CatalogError::MissingMime { position: 0, .. })
        ));
        assert!(matches!(
            Catalog::from_file("does/not/exist.json"),
            Err(CatalogError::ReadError { .. })
        ));
    }

    #[test]
    fn test_format_cache_round_trip() {
        let catalog = create_mixed_catalog();
        let json = catalog.to_json_pretty().expect("Failed to serialize catalog");
        let reloaded = Catalog::from_json(&json).expect("Failed to reload catalog");
        assert_eq!(reloaded, catalog);
    }

    #[test]
    fn test_full_workflow_from_cache() {
        let catalog = Catalog::from_json(FORMAT_CACHE_JSON).unwrap();
        let graph = Graph::builder(&catalog).build().unwrap();

        let plan = graph
            .search(
                origin("upload", "image/png"),
                SearchTarget::format("image/x-icon").via("icoWriter"),
                false,
            )
            .next()
            .expect("png should convert to ico");

        assert_eq!(PlanFormatter::format_extensions(&plan), "png → ico");
        assert_eq!(
            PlanFormatter::format_mimes(&plan),
            "image/png → image/vnd.microsoft.icon"
        );
        assert_eq!(
            PlanFormatter::format_plan(&plan),
            "upload(image/png) -> icoWriter(image/vnd.microsoft.icon)"
        );
        assert_eq!(plan.cost(), 1.0);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let catalog = create_mixed_catalog();
        let graph = Graph::build(&catalog).unwrap();

        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("graph.bin");
        graph.save(&path).expect("Failed to save snapshot");
        assert!(fs::metadata(&path).unwrap().len() > 0);

        let loaded = Graph::from_file(&path).expect("Failed to load snapshot");
        assert_eq!(loaded.nodes(), graph.nodes());
        assert_eq!(loaded.edges(), graph.edges());
        assert_eq!(
            loaded.node_index("image/png"),
            graph.node_index("image/png")
        );

        let search = |g: &Graph| {
            g.search(
                origin("upload", "text/markdown"),
                SearchTarget::format("image/jpeg"),
                true,
            )
            .collect::<Vec<_>>()
        };
        assert_eq!(search(&loaded), search(&graph));
    }

    #[test]
    fn test_policy_from_file_drives_build() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("policy.json");
        fs::write(
            &path,
            r#"{ "lossy_factor": 1.0, "default_category_penalty": 0.5 }"#,
        )
        .unwrap();

        let policy = CostPolicy::from_file(&path).expect("Failed to load policy");
        let graph = Graph::builder(&create_svg_jpeg_catalog())
            .with_policy(policy)
            .build()
            .unwrap();
        let plan = graph
            .search(
                origin("upload", "image/svg+xml"),
                SearchTarget::format("image/jpeg"),
                true,
            )
            .next()
            .unwrap();
        assert_eq!(plan.cost(), 2.5);

        assert!(matches!(
            CostPolicy::from_file(dir.path().join("missing.json")),
            Err(PolicyError::ReadError { .. })
        ));
    }

    #[test]
    fn test_snapshot_rejects_garbage() {
        assert!(Graph::from_bytes(&[0xff, 0xff, 0xff]).is_err());
        assert!(Graph::from_file("does/not/exist.bin").is_err());
    }

    #[test]
    fn test_snapshot_with_dangling_edge_is_rejected() {
        let graph = Graph::build(&create_svg_jpeg_catalog()).unwrap();
        let mut bytes = graph.to_bytes().unwrap();

        // node 0 is image/svg+xml: [node count][mime length][13 mime bytes][edge count][edge 0]
        assert_eq!(&bytes[2..15], b"image/svg+xml");
        assert_eq!(bytes[16], 0);
        bytes[16] = 250;

        let err = Graph::from_bytes(&bytes).unwrap_err();
        assert!(err.to_string().contains("missing edge 250"), "{}", err);
    }

    #[test]
    fn test_json_round_trip_keeps_graph_searchable() {
        let graph = Graph::build(&create_svg_jpeg_catalog()).unwrap();
        let json = serde_json::to_string(&graph).unwrap();
        let reloaded: Graph = serde_json::from_str(&json).expect("Failed to reload graph");

        assert_eq!(reloaded.node_index("image/png"), graph.node_index("image/png"));
        let plans: Vec<ConversionPlan> = reloaded
            .search(
                origin("upload", "image/svg+xml"),
                SearchTarget::format("image/jpeg"),
                true,
            )
            .collect();
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].cost(), 6.0);
    }

    #[test]
    fn test_tampered_graph_json_is_rejected() {
        let graph = Graph::build(&create_svg_jpeg_catalog()).unwrap();
        let value = serde_json::to_value(&graph).unwrap();
        let load = |value: serde_json::Value| serde_json::from_value::<Graph>(value);

        let mut duplicate_node = value.clone();
        duplicate_node["nodes"][1]["mime"] = "image/svg+xml".into();
        assert!(load(duplicate_node).is_err());

        let mut missing_format = value.clone();
        missing_format["edges"][0]["to"]["format"] = 99.into();
        assert!(load(missing_format).is_err());

        let mut missing_node = value.clone();
        missing_node["edges"][1]["from"]["node"] = 7.into();
        assert!(load(missing_node).is_err());

        let mut mismatched_end = value.clone();
        mismatched_end["edges"][0]["to"]["node"] = 2.into();
        assert!(load(mismatched_end).is_err());

        let mut unlisted_edge = value.clone();
        unlisted_edge["nodes"][1]["edges"] = serde_json::json!([]);
        assert!(load(unlisted_edge).is_err());

        let mut negative_cost = value;
        negative_cost["edges"][0]["cost"] = (-1.0).into();
        assert!(load(negative_cost).is_err());
    }

    #[test]
    fn test_register_and_rebuild() {
        let mut catalog = create_svg_jpeg_catalog();
        let graph = Graph::build(&catalog).unwrap();
        assert_eq!(
            graph
                .search(origin("upload", "image/svg+xml"), SearchTarget::format("image/webp"), true)
                .count(),
            0
        );

        catalog.register(HandlerDescriptor::new(
            "webp",
            vec![
                input("image/jpeg", &["image"]),
                output("image/webp", &["image"], false),
            ],
        ));
        // the old graph is a snapshot and does not change
        assert_eq!(graph.node_index("image/webp"), None);

        let rebuilt = Graph::build(&catalog).unwrap();
        let plan = rebuilt
            .search(origin("upload", "image/svg+xml"), SearchTarget::format("image/webp"), true)
            .next()
            .expect("new handler should extend the graph");
        assert_eq!(plan.handlers().collect::<Vec<_>>(), vec!["H1", "H2", "webp"]);
        assert_eq!(plan.cost(), 8.0);
    }

    #[test]
    fn test_register_replaces_same_name() {
        let mut catalog = create_svg_jpeg_catalog();
        catalog.register(HandlerDescriptor::new(
            "H1",
            vec![input("image/svg+xml", &[]), output("image/gif", &["image"], false)],
        ));

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.handlers()[1].name, "H1");

        let graph = Graph::build(&catalog).unwrap();
        assert_eq!(
            graph
                .search(origin("upload", "image/svg+xml"), SearchTarget::format("image/jpeg"), true)
                .count(),
            0
        );

        assert!(catalog.unregister("H1").is_some());
        assert!(catalog.unregister("H1").is_none());
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_custom_registry_into_catalog() {
        struct Codec {
            id: &'static str,
            reads: &'static [&'static str],
            writes: &'static [&'static str],
        }

        struct Registry(Vec<Codec>);

        impl IntoCatalog for Registry {
            fn into_catalog(self) -> std::result::Result<Catalog, CatalogError> {
                self.0
                    .into_iter()
                    .map(|codec| {
                        let formats = codec
                            .reads
                            .iter()
                            .map(|mime| FormatEntry::from_mime(mime).allow_from())
                            .chain(
                                codec
                                    .writes
                                    .iter()
                                    .map(|mime| FormatEntry::from_mime(mime).allow_to()),
                            )
                            .collect();
                        HandlerDescriptor::new(codec.id, formats)
                    })
                    .collect::<Vec<_>>()
                    .into_catalog()
            }
        }

        let catalog = Registry(vec![
            Codec {
                id: "flac",
                reads: &["audio/flac"],
                writes: &["audio/x-wav"],
            },
            Codec {
                id: "lame",
                reads: &["audio/wav"],
                writes: &["audio/mpeg"],
            },
        ])
        .into_catalog()
        .expect("Failed to convert registry");

        let graph = Graph::build(&catalog).unwrap();
        let plan = graph
            .search(origin("upload", "audio/flac"), SearchTarget::format("audio/mpeg"), true)
            .next()
            .expect("flac should reach mp3 through the wav alias");
        assert_eq!(plan.handlers().collect::<Vec<_>>(), vec!["flac", "lame"]);

        let broken = Registry(vec![Codec {
            id: "bad",
            reads: &["flac"],
            writes: &[],
        }])
        .into_catalog();
        assert!(matches!(broken, Err(CatalogError::MalformedMime { .. })));
    }
}
