//! Built-in rule catalog for the model exporter.
//!
//! `POE####` rules cover the TorchScript-based operator export path, `FXE####`
//! rules the FX-graph path, and `DIAGSYS####` the diagnostic machinery itself.
//! A few entries are placeholders carried over from the upstream catalog
//! ("ToDo" text); they are ordinary data and nothing keys off their content.

use super::descriptor::RuleDescriptor;

/// Rule id constants, for call sites that raise these rules.
pub mod ids {
    pub const NODE_MISSING_ONNX_SHAPE_INFERENCE: &str = "POE0001";
    pub const MISSING_CUSTOM_SYMBOLIC_FUNCTION: &str = "POE0002";
    pub const MISSING_STANDARD_SYMBOLIC_FUNCTION: &str = "POE0003";
    pub const OPERATOR_SUPPORTED_IN_NEWER_OPSET_VERSION: &str = "POE0004";
    pub const FX_GRAPH_TO_ONNX: &str = "FXE0007";
    pub const FX_NODE_TO_ONNX: &str = "FXE0008";
    pub const FX_FRONTEND_AOTAUTOGRAD: &str = "FXE0009";
    pub const FX_PASS: &str = "FXE0010";
    pub const NO_SYMBOLIC_FUNCTION_FOR_CALL_FUNCTION: &str = "FXE0011";
    pub const UNSUPPORTED_FX_NODE_ANALYSIS: &str = "FXE0012";
    pub const OP_LEVEL_DEBUGGING: &str = "FXE0013";
    pub const FIND_OPSCHEMA_MATCHED_SYMBOLIC_FUNCTION: &str = "FXE0014";
    pub const FX_NODE_INSERT_TYPE_PROMOTION: &str = "FXE0015";
    pub const FIND_OPERATOR_OVERLOADS_IN_ONNX_REGISTRY: &str = "FXE0016";
    pub const MESSAGE_VERBOSITY_EXCEEDED: &str = "DIAGSYS0001";
}

/// The built-in catalog, in its canonical order.
pub fn builtin_rules() -> Vec<RuleDescriptor> {
    vec![
        RuleDescriptor::new(
            ids::NODE_MISSING_ONNX_SHAPE_INFERENCE,
            "node-missing-onnx-shape-inference",
            "Node is missing ONNX shape inference.",
        )
        .with_default_template(
            "The shape inference of {op_name} type is missing, so it may result in wrong shape \
             inference for the exported graph. Please consider adding it in symbolic function.",
        ),
        RuleDescriptor::new(
            ids::MISSING_CUSTOM_SYMBOLIC_FUNCTION,
            "missing-custom-symbolic-function",
            "Missing symbolic function for custom operator.",
        )
        .with_default_template(
            "ONNX export failed on an operator with unrecognized namespace {op_name}. If you are \
             trying to export a custom operator, make sure you registered it with the right \
             domain and version.",
        ),
        RuleDescriptor::new(
            ids::MISSING_STANDARD_SYMBOLIC_FUNCTION,
            "missing-standard-symbolic-function",
            "Missing symbolic function for standard operator.",
        )
        .with_default_template(
            "Exporting the operator '{op_name}' to ONNX opset version {opset_version} is not \
             supported. Please feel free to request support or submit a pull request on GitHub: \
             {issue_url}.",
        ),
        RuleDescriptor::new(
            ids::OPERATOR_SUPPORTED_IN_NEWER_OPSET_VERSION,
            "operator-supported-in-newer-opset-version",
            "Operator is supported in a newer opset version.",
        )
        .with_default_template(
            "Exporting the operator '{op_name}' to ONNX opset version {opset_version} is not \
             supported. Support for this operator was added in version \
             {supported_opset_version}, try exporting with this version.",
        ),
        RuleDescriptor::new(
            ids::FX_GRAPH_TO_ONNX,
            "fx-graph-to-onnx",
            "Transforming an FX graph into an ONNX graph.",
        )
        .with_default_template("Transforming FX graph {graph_name} to ONNX graph.")
        .with_tag("fx"),
        RuleDescriptor::new(
            ids::FX_NODE_TO_ONNX,
            "fx-node-to-onnx",
            "Transforming an FX node to an ONNX node.",
        )
        .with_default_template("Transforming FX node {node_repr} to ONNX node.")
        .with_tag("fx"),
        // Placeholder entry carried from the upstream catalog.
        RuleDescriptor::new(
            ids::FX_FRONTEND_AOTAUTOGRAD,
            "fx-frontend-aotautograd",
            "ToDo, experimental. Report any op level validation failure in warnings.",
        )
        .with_default_template("ToDo, experimental. {message}")
        .with_tag("fx"),
        RuleDescriptor::new(ids::FX_PASS, "fx-pass", "FX graph transformation pass.")
            .with_default_template("Running {pass_name} pass.")
            .with_tag("fx"),
        RuleDescriptor::new(
            ids::NO_SYMBOLIC_FUNCTION_FOR_CALL_FUNCTION,
            "no-symbolic-function-for-call-function",
            "Cannot find symbolic function to convert the \"call_function\" FX node.",
        )
        .with_default_template(
            "No symbolic function to convert the \"call_function\" node {target} to ONNX.",
        )
        .with_tag("fx"),
        RuleDescriptor::new(
            ids::UNSUPPORTED_FX_NODE_ANALYSIS,
            "unsupported-fx-node-analysis",
            "Result from FX graph analysis to reveal unsupported FX nodes.",
        )
        .with_default_template(
            "Unsupported FX nodes: {node_op_to_target_mapping}.",
        )
        .with_tag("fx"),
        RuleDescriptor::new(
            ids::OP_LEVEL_DEBUGGING,
            "op-level-debugging",
            "Report any op level validation failure in warnings.",
        )
        .with_default_template("FX node: {node} and its onnx function: {symbolic_fn} fails on op level validation.")
        .with_tag("fx"),
        RuleDescriptor::new(
            ids::FIND_OPSCHEMA_MATCHED_SYMBOLIC_FUNCTION,
            "find-opschema-matched-symbolic-function",
            "Find the OnnxFunction that matches the input/attribute dtypes by comparing them \
             with their opschemas.",
        )
        .with_default_template(
            "The OnnxFunction: {symbolic_fn} is the {match_quality} match of the node {node}.",
        )
        .with_tag("fx"),
        RuleDescriptor::new(
            ids::FX_NODE_INSERT_TYPE_PROMOTION,
            "fx-node-insert-type-promotion",
            "Determine if type promotion is required for the FX node. Insert cast nodes if needed.",
        )
        .with_default_template("Performing explicit type promotion on node {target}.")
        .with_tag("fx"),
        RuleDescriptor::new(
            ids::FIND_OPERATOR_OVERLOADS_IN_ONNX_REGISTRY,
            "find-operator-overloads-in-onnx-registry",
            "Find the list of OnnxFunction of the PyTorch operator in onnx registry.",
        )
        .with_default_template(
            "Checking if the FX node: {node} is supported in onnx registry.",
        )
        .with_tag("fx"),
        RuleDescriptor::new(
            ids::MESSAGE_VERBOSITY_EXCEEDED,
            "message-verbosity-exceeded",
            "A rendered diagnostic message exceeded the verbosity limit and was truncated.",
        )
        .with_default_template(
            "Message for rule {rule_id} exceeded the verbosity limit of {limit} characters and \
             was truncated.",
        )
        .with_tag("diagnostics"),
    ]
}
