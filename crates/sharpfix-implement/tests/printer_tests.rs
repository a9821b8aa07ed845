use crate::ir::{
    AccessorKeyword, AccessorNode, ArgNode, BodyNode, ConstraintNode, DeclNode, ExprNode,
    MemberNode, ParamNode, PropertyBody, StmtNode,
};
use crate::printer::{print_expression, print_member};
use sharpfix_symbols::OperatorKind;

fn member(modifiers: Vec<&'static str>, decl: DeclNode) -> MemberNode {
    MemberNode {
        leading_comments: Vec::new(),
        attributes: Vec::new(),
        modifiers,
        decl,
    }
}

fn param(modifier: &'static str, ty: &str, name: &str) -> ParamNode {
    ParamNode {
        attributes: Vec::new(),
        modifier,
        ty: ty.to_string(),
        name: name.to_string(),
        default: None,
    }
}

fn throw_block() -> BodyNode {
    BodyNode::Block(vec![StmtNode::Throw(ExprNode::New {
        ty: "NotImplementedException".to_string(),
        args: Vec::new(),
    })])
}

#[test]
fn test_cast_receiver_is_parenthesized() {
    let call = ExprNode::call(
        ExprNode::member(
            ExprNode::Cast {
                ty: "IInterface".to_string(),
                expr: Box::new(ExprNode::ident("inner")),
            },
            "M",
        ),
        vec![ArgNode {
            name: None,
            modifier: "out ",
            value: ExprNode::ident("x"),
        }],
    );

    assert_eq!(print_expression(&call), "((IInterface)inner).M(out x)");
}

#[test]
fn test_named_arguments_and_element_access() {
    let call = ExprNode::call(
        ExprNode::ident("Dispose"),
        vec![ArgNode::named("disposing", ExprNode::Literal("true".to_string()))],
    );
    let element = ExprNode::Element {
        receiver: Box::new(ExprNode::ident("inner")),
        args: vec![
            ArgNode::positional(ExprNode::ident("a")),
            ArgNode::positional(ExprNode::ident("b")),
        ],
    };

    assert_eq!(print_expression(&call), "Dispose(disposing: true)");
    assert_eq!(print_expression(&element), "inner[a, b]");
    assert_eq!(
        print_expression(&ExprNode::assign(element, "=", ExprNode::ident("value"))),
        "inner[a, b] = value"
    );
}

#[test]
fn test_generic_method_with_constraints() {
    let node = member(
        vec!["public"],
        DeclNode::Method {
            return_type: "T".to_string(),
            explicit_interface: None,
            name: "Create".to_string(),
            type_parameters: vec!["T".to_string(), "U".to_string()],
            parameters: vec![param("params ", "U[]", "args")],
            constraints: vec![
                ConstraintNode {
                    parameter: "T".to_string(),
                    constraints: vec!["class".to_string(), "new()".to_string()],
                },
                ConstraintNode {
                    parameter: "U".to_string(),
                    constraints: vec!["struct".to_string()],
                },
            ],
            body: throw_block(),
        },
    );

    assert_eq!(
        print_member(&node, "    ", "    "),
        "    public T Create<T, U>(params U[] args) where T : class, new() where U : struct
    {
        throw new NotImplementedException();
    }"
    );
}

#[test]
fn test_expression_bodied_method_and_abstract_method() {
    let forwarding = member(
        vec!["public"],
        DeclNode::Method {
            return_type: "int".to_string(),
            explicit_interface: None,
            name: "Get".to_string(),
            type_parameters: Vec::new(),
            parameters: Vec::new(),
            constraints: Vec::new(),
            body: BodyNode::Expression(ExprNode::call(
                ExprNode::member(ExprNode::ident("inner"), "Get"),
                Vec::new(),
            )),
        },
    );
    let abstract_method = member(
        vec!["public", "abstract"],
        DeclNode::Method {
            return_type: "void".to_string(),
            explicit_interface: None,
            name: "M".to_string(),
            type_parameters: Vec::new(),
            parameters: Vec::new(),
            constraints: Vec::new(),
            body: BodyNode::Semicolon,
        },
    );

    assert_eq!(
        print_member(&forwarding, "", "    "),
        "public int Get() => inner.Get();"
    );
    assert_eq!(print_member(&abstract_method, "", "    "), "public abstract void M();");
}

#[test]
fn test_accessor_layouts() {
    let auto = member(
        vec!["public"],
        DeclNode::Property {
            ty: "int".to_string(),
            explicit_interface: None,
            name: "P".to_string(),
            parameters: Vec::new(),
            body: PropertyBody::Accessors(vec![
                AccessorNode {
                    keyword: AccessorKeyword::Get,
                    body: BodyNode::Semicolon,
                },
                AccessorNode {
                    keyword: AccessorKeyword::Init,
                    body: BodyNode::Semicolon,
                },
            ]),
        },
    );
    let expression_accessors = member(
        Vec::new(),
        DeclNode::Property {
            ty: "string".to_string(),
            explicit_interface: Some("IInterface".to_string()),
            name: String::new(),
            parameters: vec![param("", "int", "index")],
            body: PropertyBody::Accessors(vec![
                AccessorNode {
                    keyword: AccessorKeyword::Get,
                    body: BodyNode::Expression(ExprNode::ident("x")),
                },
                AccessorNode {
                    keyword: AccessorKeyword::Set,
                    body: BodyNode::Expression(ExprNode::ident("y")),
                },
            ]),
        },
    );

    assert_eq!(
        print_member(&auto, "    ", "    "),
        "    public int P { get; init; }"
    );
    assert_eq!(
        print_member(&expression_accessors, "", "  "),
        "string IInterface.this[int index]\n{\n  get => x;\n  set => y;\n}"
    );
}

#[test]
fn test_operators_and_conversions() {
    let plus = member(
        vec!["public", "static"],
        DeclNode::Operator {
            return_type: "C".to_string(),
            explicit_interface: None,
            operator: OperatorKind::Plus,
            parameters: vec![param("", "C", "left"), param("", "C", "right")],
            body: BodyNode::Semicolon,
        },
    );
    let conversion = member(
        vec!["static"],
        DeclNode::Operator {
            return_type: "int".to_string(),
            explicit_interface: Some("IConvertible<C>".to_string()),
            operator: OperatorKind::ImplicitConversion,
            parameters: vec![param("", "C", "value")],
            body: BodyNode::Semicolon,
        },
    );

    assert_eq!(
        print_member(&plus, "", "    "),
        "public static C operator +(C left, C right);"
    );
    assert_eq!(
        print_member(&conversion, "", "    "),
        "static implicit IConvertible<C>.operator int(C value);"
    );
}

#[test]
fn test_comments_attributes_and_blank_lines() {
    let node = MemberNode {
        leading_comments: vec!["// first".to_string(), String::new()],
        attributes: vec!["Obsolete(\"x\")".to_string()],
        modifiers: vec!["private"],
        decl: DeclNode::Field {
            ty: "bool".to_string(),
            name: "flag".to_string(),
            initializer: Some(ExprNode::Not(Box::new(ExprNode::ident("other")))),
        },
    };

    assert_eq!(
        print_member(&node, "    ", "    "),
        "    // first\n\n    [Obsolete(\"x\")]\n    private bool flag = !other;"
    );
}

#[test]
fn test_nested_if_blocks_and_field_like_event() {
    let method = member(
        vec!["private"],
        DeclNode::Method {
            return_type: "void".to_string(),
            explicit_interface: None,
            name: "Run".to_string(),
            type_parameters: Vec::new(),
            parameters: Vec::new(),
            constraints: Vec::new(),
            body: BodyNode::Block(vec![
                StmtNode::If {
                    condition: ExprNode::ident("ready"),
                    then: vec![StmtNode::Comment("go".to_string())],
                },
                StmtNode::Blank,
                StmtNode::Return(ExprNode::This),
            ]),
        },
    );
    let event = member(
        vec!["public"],
        DeclNode::Event {
            ty: "EventHandler".to_string(),
            explicit_interface: None,
            name: "Changed".to_string(),
            accessors: None,
        },
    );

    assert_eq!(
        print_member(&method, "", "\t"),
        "private void Run()\n{\n\tif (ready)\n\t{\n\t\t// go\n\t}\n\n\treturn this;\n}"
    );
    assert_eq!(
        print_member(&event, "", "\t"),
        "public event EventHandler Changed;"
    );
}
