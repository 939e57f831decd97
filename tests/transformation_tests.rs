//! End-to-end tests for transformation serialization
//!
//! These cover the public builder surface the way a URL-assembly caller
//! uses it: fluent setters, stage chaining, variables, and the fail-closed
//! render contract.

use mediatx::error::RenderError;
use mediatx::expression::Expression;
use mediatx::transformation::{Param, Transformation};
use mediatx::variable::Variable;

#[test]
fn single_stage_renders_keys_in_lexicographic_order() {
    let token = Transformation::new()
        .width(100)
        .height(101)
        .crop("crop")
        .render()
        .unwrap();
    assert_eq!(token, "c_crop,h_101,w_100");
}

#[test]
fn chained_stages_join_with_slashes() {
    let token = Transformation::new()
        .x(100)
        .y(100)
        .crop("fill")
        .chain()
        .crop("crop")
        .width(100)
        .render()
        .unwrap();
    assert_eq!(token, "c_fill,x_100,y_100/c_crop,w_100");
}

#[test]
fn chaining_commits_exactly_one_boundary_per_call() {
    let token = Transformation::new()
        .width(1)
        .chain()
        .width(2)
        .chain()
        .width(3)
        .render()
        .unwrap();
    assert_eq!(token.matches('/').count(), 2);
    assert_eq!(token, "w_1/w_2/w_3");
}

#[test]
fn call_order_within_a_stage_is_irrelevant() {
    let forward = Transformation::new()
        .angle(45)
        .quality(80)
        .gravity("face")
        .render()
        .unwrap();
    let reverse = Transformation::new()
        .gravity("face")
        .quality(80)
        .angle(45)
        .render()
        .unwrap();
    assert_eq!(forward, reverse);
    assert_eq!(forward, "a_45,g_face,q_80");
}

#[test]
fn empty_value_anywhere_fails_the_whole_render() {
    let result = Transformation::new()
        .width(100)
        .chain()
        .crop("")
        .chain()
        .height(200)
        .render();
    assert_eq!(
        result,
        Err(RenderError::EmptyParam {
            key: "c".to_string()
        })
    );
}

#[test]
fn trailing_chain_emits_no_empty_segment() {
    let token = Transformation::new()
        .width(100)
        .crop("scale")
        .chain()
        .render()
        .unwrap();
    assert_eq!(token, "c_scale,w_100");
    assert!(!token.ends_with('/'));
}

#[test]
fn interior_empty_stage_emits_no_double_slash() {
    let token = Transformation::new()
        .width(1)
        .chain()
        .chain()
        .height(2)
        .render()
        .unwrap();
    assert_eq!(token, "w_1/h_2");
}

#[test]
fn raw_transformation_rides_last_in_its_stage() {
    let token = Transformation::new()
        .width(500)
        .raw_transformation("e_grayscale,a_45")
        .crop("limit")
        .render()
        .unwrap();
    assert_eq!(token, "c_limit,w_500,e_grayscale,a_45");
}

#[test]
fn raw_transformation_alone_renders_bare() {
    let token = Transformation::new()
        .raw_transformation("e_sepia")
        .render()
        .unwrap();
    assert_eq!(token, "e_sepia");
}

#[test]
fn variable_binding_renders_as_stage_param() {
    let var = Variable::new("xpos", "10");
    assert_eq!(var.render(), "$xpos_10");

    let token = Transformation::new()
        .variable(&var)
        .x("$xpos")
        .width(300)
        .render()
        .unwrap();
    assert_eq!(token, "$xpos_10,w_300,x_$xpos");
}

#[test]
fn multiple_variables_sort_with_other_params() {
    let vars = [Variable::new("b", 2), Variable::new("a", 1)];
    let token = Transformation::new()
        .variables(&vars)
        .width("$a")
        .render()
        .unwrap();
    assert_eq!(token, "$a_1,$b_2,w_$a");
}

#[test]
fn invalid_variable_degrades_to_nothing() {
    let bad = Variable::new("not valid", 1);
    assert_eq!(bad.render(), "");
    let token = Transformation::new()
        .variable(&bad)
        .width(10)
        .render()
        .unwrap();
    assert_eq!(token, "w_10");
}

#[test]
fn expression_output_feeds_parameter_values() {
    let width_rule = Expression::initial_width().divide(2);
    let token = Transformation::new()
        .width(width_rule.render())
        .crop("scale")
        .render()
        .unwrap();
    assert_eq!(token, "c_scale,w_iw_div_2");
}

#[test]
fn expression_param_pair_feeds_set() {
    let (key, value) = Expression::width().add(20).as_param_pair().unwrap();
    let token = Transformation::new().param(&key, value).render().unwrap();
    assert_eq!(token, "w_add_20");
}

#[test]
fn stage_params_overwrite_not_append() {
    let token = Transformation::new()
        .set(Param::Quality, 30)
        .set(Param::Quality, 80)
        .render()
        .unwrap();
    assert_eq!(token, "q_80");
}

#[test]
fn builders_are_independent() {
    let base = Transformation::new().width(100);
    let a = base.clone().crop("fill").render().unwrap();
    let b = base.crop("fit").render().unwrap();
    assert_eq!(a, "c_fill,w_100");
    assert_eq!(b, "c_fit,w_100");
}
