use super::*;

fn record(id: &str, name: &str) -> DriveFileRecord {
    DriveFileRecord {
        id: id.to_string(),
        name: name.to_string(),
        ..Default::default()
    }
}

#[test]
fn test_extract_dotted_handle_is_kept_verbatim() {
    let owner = extract_owner_handle("Title_catenary.bim.designer.glb").unwrap();
    assert_eq!(owner.raw_segment, "catenary.bim.designer");
    assert_eq!(owner.normalized_handle, "catenary.bim.designer");
}

#[test]
fn test_extract_folds_underscores_to_dots() {
    let owner = extract_owner_handle("Hero_catenary_bim_designer.glb").unwrap();
    assert_eq!(owner.raw_segment, "catenary_bim_designer");
    assert_eq!(owner.normalized_handle, "catenary.bim.designer");
    assert_eq!(owner.pseudo_email(), "catenary.bim.designer@gmail.com");
}

#[test]
fn test_extract_two_segment_handle() {
    let owner = extract_owner_handle("Logo_jane_doe.glb").unwrap();
    assert_eq!(owner.normalized_handle, "jane.doe");
}

#[test]
fn test_extract_bare_word_handle() {
    let owner = extract_owner_handle("Logo_abcdef.glb").unwrap();
    assert_eq!(owner.raw_segment, "abcdef");
    assert_eq!(owner.normalized_handle, "abcdef");
}

#[test]
fn test_extract_requires_a_separator() {
    assert_eq!(extract_owner_handle("model.glb"), None);
    assert_eq!(extract_owner_handle("justonename"), None);
}

#[test]
fn test_extract_rejects_short_suffixes() {
    // "ab" never clears the 5-character gate, no matter the identity asking.
    assert_eq!(extract_owner_handle("Logo_ab.glb"), None);
    assert_eq!(extract_owner_handle("a_b.glb"), None);
}

#[test]
fn test_extract_tolerates_degenerate_names() {
    assert_eq!(extract_owner_handle(""), None);
    assert_eq!(extract_owner_handle("_"), None);
    assert_eq!(extract_owner_handle("______"), None);
    assert_eq!(extract_owner_handle(".glb"), None);
}

#[test]
fn test_extract_works_without_an_extension() {
    let owner = extract_owner_handle("Hero_jane_doe").unwrap();
    assert_eq!(owner.normalized_handle, "jane.doe");
}

#[test]
fn test_greedy_loop_absorbs_underscored_title() {
    // Longest suffix is tried first, so a title segment past the first `_`
    // becomes part of the handle. Stored filenames rely on this order.
    let owner = extract_owner_handle("My_Hero_catenary_bim_designer.glb").unwrap();
    assert_eq!(owner.raw_segment, "Hero_catenary_bim_designer");
    assert_eq!(owner.normalized_handle, "Hero.catenary.bim.designer");
}

#[test]
fn test_distinct_suffix_shapes_collide_after_normalization() {
    let underscored = extract_owner_handle("Logo_jane_doe.glb").unwrap();
    let dotted = extract_owner_handle("Logo_jane.doe.glb").unwrap();
    assert_ne!(underscored.raw_segment, dotted.raw_segment);
    assert_eq!(underscored.pseudo_email(), dotted.pseudo_email());

    // Both files therefore land in the same user's scoped view.
    let files = vec![
        record("f1", "Logo_jane_doe.glb"),
        record("f2", "Logo_jane.doe.glb"),
    ];
    let listing = classify(&files, &Identity::email("jane.doe@gmail.com"));
    assert_eq!(listing.objects.len(), 2);
}

#[test]
fn test_classify_pairs_model_with_thumbnail() {
    let files = vec![record("m1", "model.glb"), record("i1", "model.png")];
    let listing = classify(&files, &Identity::All);

    assert_eq!(listing.objects.len(), 1);
    let asset = &listing.objects[0];
    assert_eq!(asset.id, "m1");
    assert_eq!(asset.thumbnail.as_ref().unwrap().name, "model.png");
}

#[test]
fn test_classify_scoped_scenario() {
    let files = vec![
        record("m1", "Hero_catenary_bim_designer.glb"),
        record("i1", "Hero_catenary_bim_designer.png"),
    ];
    let listing = classify(&files, &Identity::email("catenary.bim.designer@gmail.com"));

    assert_eq!(listing.objects.len(), 1);
    let asset = &listing.objects[0];
    assert_eq!(asset.display_name, "Hero");
    assert_eq!(
        asset.thumbnail.as_ref().unwrap().name,
        "Hero_catenary_bim_designer.png"
    );
    assert_eq!(
        asset.owner_handle.as_ref().unwrap().pseudo_email(),
        "catenary.bim.designer@gmail.com"
    );
}

#[test]
fn test_classify_excludes_other_users_files() {
    let files = vec![
        record("m1", "Hero_catenary_bim_designer.glb"),
        record("m2", "Castle_john_smith.glb"),
    ];
    let listing = classify(&files, &Identity::email("catenary.bim.designer@gmail.com"));

    assert_eq!(listing.objects.len(), 1);
    assert_eq!(listing.objects[0].id, "m1");
}

#[test]
fn test_classify_fails_closed_on_unattributable_names() {
    // No qualifying suffix: visible in the unfiltered view, never in a
    // user-scoped one.
    let files = vec![record("m1", "Logo_ab.glb")];

    assert!(classify(&files, &Identity::email("ab@gmail.com"))
        .objects
        .is_empty());
    assert!(classify(&files, &Identity::email("logo.ab@gmail.com"))
        .objects
        .is_empty());
    assert_eq!(classify(&files, &Identity::All).objects.len(), 1);
}

#[test]
fn test_classify_all_view_skips_extraction() {
    let files = vec![record("m1", "Hero_catenary_bim_designer.glb")];
    let listing = classify(&files, &Identity::All);

    let asset = &listing.objects[0];
    assert_eq!(asset.owner_handle, None);
    assert_eq!(asset.display_name, "Hero Catenary Bim Designer");
}

#[test]
fn test_classify_is_idempotent() {
    let files = vec![
        record("m1", "Hero_jane_doe.glb"),
        record("i1", "Hero_jane_doe.png"),
        record("m2", "Logo_ab.glb"),
    ];
    let identity = Identity::email("jane.doe@gmail.com");

    assert_eq!(classify(&files, &identity), classify(&files, &identity));
}

#[test]
fn test_classify_preserves_input_order() {
    let files = vec![
        record("m3", "Crown_jane_doe.glb"),
        record("m1", "Anvil_jane_doe.glb"),
        record("m2", "Boat_jane_doe.glb"),
    ];
    let listing = classify(&files, &Identity::All);

    let ids: Vec<&str> = listing.objects.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, ["m3", "m1", "m2"]);
}

#[test]
fn test_classify_first_matching_image_wins() {
    let files = vec![
        record("m1", "box_jane_doe.glb"),
        record("img-1", "box_jane_doe.png"),
        record("img-2", "box_jane_doe.png"),
    ];
    let listing = classify(&files, &Identity::All);

    assert_eq!(listing.objects[0].thumbnail.as_ref().unwrap().id, "img-1");
}

#[test]
fn test_proxy_urls() {
    let files = vec![
        record("model-1", "box_jane_doe.glb"),
        record("img-1", "box_jane_doe.png"),
    ];
    let listing = classify(&files, &Identity::All);

    let asset = &listing.objects[0];
    assert_eq!(
        asset.download_url(),
        "/api/models/model-1?filename=box_jane_doe.glb"
    );
    assert_eq!(
        asset.image_url().unwrap(),
        "/api/images/img-1?filename=box_jane_doe.png"
    );

    let bare = classify(&[record("model-2", "lone_jane_doe.glb")], &Identity::All);
    assert_eq!(bare.objects[0].image_url(), None);
}

#[test]
fn test_display_name_strips_dotted_identifier() {
    assert_eq!(
        generate_display_name("john.smith_design_v2.glb"),
        "Design V2"
    );
}

#[test]
fn test_display_name_strips_embedded_email() {
    assert_eq!(
        generate_display_name("Space Rover lee@example.com.glb"),
        "Space Rover"
    );
}

#[test]
fn test_display_name_strips_timestamp_run() {
    assert_eq!(generate_display_name("Tower_1715678900123.glb"), "Tower");
}

#[test]
fn test_display_name_title_cases_words() {
    assert_eq!(generate_display_name("big_red_dragon.glb"), "Big Red Dragon");
    assert_eq!(generate_display_name("SHOUTY_NAME.glb"), "Shouty Name");
}

#[test]
fn test_display_name_falls_back_when_nothing_survives() {
    assert_eq!(generate_display_name("x.glb"), "Custom Model");
    assert_eq!(generate_display_name("jane.doe.glb"), "Custom Model");
    assert_eq!(generate_display_name("__.glb"), "Custom Model");
    assert_eq!(generate_display_name(""), "Custom Model");
}

#[test]
fn test_filter_user_files_matches_sanitized_identifier() {
    let files = vec![
        record("f1", "Hero_jane_doe.glb"),
        record("f2", "HERO_JANE_DOE.PNG"),
        record("f3", "Logo_john_smith.glb"),
    ];
    let matched = filter_user_files(&files, "jane.doe@gmail.com");

    let ids: Vec<&str> = matched.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, ["f1", "f2"]);
}

#[test]
fn test_size_bytes_parses_with_zero_fallback() {
    let mut file = record("f1", "model.glb");
    assert_eq!(file.size_bytes(), 0);

    file.size = Some("12345".to_string());
    assert_eq!(file.size_bytes(), 12345);

    file.size = Some("12.5".to_string());
    assert_eq!(file.size_bytes(), 0);
}

#[test]
fn test_base_file_name() {
    assert_eq!(base_file_name("model.glb"), "model");
    assert_eq!(base_file_name("archive.tar.gz"), "archive.tar");
    assert_eq!(base_file_name("noext"), "noext");
    assert_eq!(base_file_name(".hidden"), ".hidden");
    assert_eq!(base_file_name("model."), "model");
}

#[test]
fn test_extension_checks_are_case_insensitive() {
    assert!(is_model_file("Hero_jane_doe.GLB"));
    assert!(is_model_file("scene.gltf"));
    assert!(!is_model_file("notes.txt"));
    assert!(is_image_file("Hero_jane_doe.PNG"));
    assert!(is_image_file("photo.jpeg"));
    assert!(!is_image_file("model.glb"));
}
