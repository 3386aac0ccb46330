use super::*;

fn ctx() -> EmitContext {
    EmitContext {
        image_urls: vec!["/s-1.jpg".to_owned(), "/s-2.jpg".to_owned(), "/s-3.jpg".to_owned()],
        duration: "1m".to_owned(),
        milestones: vec![25.0, 62.5],
        is_cycling: true,
        class_name: "fade".to_owned(),
        start_at: "10s".to_owned(),
    }
}

#[test]
fn react_defaults_come_from_config() {
    let out = ReactGenerator.generate(&ctx()).unwrap();
    assert!(out.starts_with("import { useEffect, useRef, useState } from \"react\";"));
    assert!(out.contains(r#"const DEFAULT_IMAGES = ["/s-1.jpg", "/s-2.jpg", "/s-3.jpg"];"#));
    assert!(out.contains("const DEFAULT_MILESTONES = [25, 62.5];"));
    assert!(out.contains("  duration = \"1m\","));
    assert!(out.contains("  className = \"fade\","));
    assert!(out.contains("  isCycling = true,"));
    assert!(out.contains("  startAt = \"10s\","));
    assert!(out.contains("fadeEngine.start(elements, { duration, milestones, isCycling, startAt })"));
}

#[test]
fn vue_declares_every_prop() {
    let out = VueGenerator.generate(&ctx()).unwrap();
    assert!(out.starts_with("<script setup>"));
    for prop in ["images:", "duration:", "milestones:", "className:", "isCycling:", "startAt:"] {
        assert!(out.contains(&format!("  {prop} {{ type:")), "missing {prop}");
    }
    assert!(out.contains("default: () => [25, 62.5]"));
    assert!(out.contains("<template>"));
}

#[test]
fn svelte_exports_every_prop() {
    let out = SvelteGenerator.generate(&ctx()).unwrap();
    assert!(out.contains("  export let duration = \"1m\";"));
    assert!(out.contains("  export let isCycling = true;"));
    assert!(out.contains("  export let startAt = \"10s\";"));
    assert!(out.contains("{#each images as src, index}"));
}

#[test]
fn user_text_cannot_close_the_script_block() {
    let ctx = EmitContext {
        class_name: "</script><b>".to_owned(),
        ..ctx()
    };
    for out in [
        ReactGenerator.generate(&ctx).unwrap(),
        VueGenerator.generate(&ctx).unwrap(),
        SvelteGenerator.generate(&ctx).unwrap(),
    ] {
        assert!(!out.contains("</script><b>"));
    }
}
