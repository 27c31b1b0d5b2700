use pretty_assertions::assert_eq;
use rust_dmr_diylisp::environment::{AlreadyDefined, UndefinedSymbol};
use rust_dmr_diylisp::evaluator::{self, Error};
use rust_dmr_diylisp::reader::read_str;
use rust_dmr_diylisp::types::{BadArgCount, Closure, LispObject, LispSymbol};
use rust_dmr_diylisp::{evaluate, Environment};
use std::rc::Rc;

fn global() -> Rc<Environment> {
    Rc::new(Environment::new())
}

fn eval_in(source: &str, env: &Rc<Environment>) -> evaluator::Result {
    evaluate(&read_str(source).expect("test source should read"), env)
}

fn eval(source: &str) -> evaluator::Result {
    eval_in(source, &global())
}

fn int(x: i64) -> LispObject {
    LispObject::Integer(x)
}

fn sym(name: &str) -> LispObject {
    LispObject::new_symbol(name)
}

fn list(items: Vec<LispObject>) -> LispObject {
    LispObject::wrap_list(items)
}

#[test]
fn self_evaluating_values() {
    let env = global();
    assert_eq!(evaluate(&int(5), &env), Ok(int(5)));
    assert_eq!(evaluate(&LispObject::Bool(true), &env), Ok(LispObject::Bool(true)));
    assert_eq!(evaluate(&LispObject::new_list(), &env), Ok(LispObject::new_list()));
}

#[test]
fn addition_from_a_built_tree() {
    let ast = list(vec![sym("+"), int(2), int(3)]);
    assert_eq!(evaluate(&ast, &global()), Ok(int(5)));
}

#[test]
fn quote_does_not_evaluate() {
    let ast = list(vec![sym("quote"), list(vec![int(1), int(2)])]);
    assert_eq!(evaluate(&ast, &global()), Ok(list(vec![int(1), int(2)])));
}

#[test]
fn untaken_branch_is_never_evaluated() {
    assert_eq!(eval("(if (eq 1 1) 10 (/ 1 0))"), Ok(int(10)));

    // A define in the untaken branch would leave a trace in the environment.
    let env = global();
    assert_eq!(eval_in("(if #f (define taken #t) 2)", &env), Ok(int(2)));
    assert!(eval_in("taken", &env).is_err());
}

#[test]
fn define_then_lookup_then_redefine() {
    let env = global();
    eval_in("(define x 10)", &env).unwrap();
    assert_eq!(env.lookup(&LispSymbol::from("x")), Ok(int(10)));
    assert_eq!(
        eval_in("(define x 11)", &env),
        Err(Error::AlreadyDefined(AlreadyDefined(LispSymbol::from("x"))))
    );
}

#[test]
fn eq_never_holds_for_lists() {
    assert_eq!(eval("(eq '(1 2) '(1 2))"), Ok(LispObject::Bool(false)));
    assert_eq!(eval("(eq 1 1)"), Ok(LispObject::Bool(true)));
}

#[test]
fn list_primitives() {
    assert_eq!(eval("(head '())"), Err(Error::EmptyList));
    assert_eq!(eval("(tail '())"), Ok(LispObject::new_list()));
    assert_eq!(eval("(cons 1 '(2 3))"), Ok(list(vec![int(1), int(2), int(3)])));
}

#[test]
fn applying_a_closure_value_directly() {
    let closure = LispObject::Closure(Rc::new(Closure {
        parameters: vec![LispSymbol::from("x"), LispSymbol::from("y")],
        body: list(vec![sym("+"), sym("x"), sym("y")]),
        env: global(),
    }));
    let env = global();

    let call = list(vec![closure.clone(), int(3), int(4)]);
    assert_eq!(evaluate(&call, &env), Ok(int(7)));

    let call = list(vec![closure, int(3), int(4), int(5)]);
    assert_eq!(
        evaluate(&call, &env),
        Err(Error::ArityMismatch(BadArgCount {
            name: "closure",
            expected: 2,
            got: 3
        }))
    );
}

#[test]
fn forward_reference_between_top_level_functions() {
    let env = global();
    eval_in("(define f (lambda () (g)))", &env).unwrap();
    eval_in("(define g (lambda () 42))", &env).unwrap();
    assert_eq!(eval_in("(f)", &env), Ok(int(42)));
}

#[test]
fn mutual_recursion_at_top_level() {
    let env = global();
    eval_in(
        "(define even (lambda (n) (if (eq n 0) #t (odd (- n 1)))))",
        &env,
    )
    .unwrap();
    eval_in(
        "(define odd (lambda (n) (if (eq n 0) #f (even (- n 1)))))",
        &env,
    )
    .unwrap();
    assert_eq!(eval_in("(even 10)", &env), Ok(LispObject::Bool(true)));
    assert_eq!(eval_in("(odd 7)", &env), Ok(LispObject::Bool(true)));
}

#[test]
fn recursion_through_the_global_environment() {
    let env = global();
    eval_in(
        "(define fact (lambda (n) (if (< n 1) 1 (* n (fact (- n 1))))))",
        &env,
    )
    .unwrap();
    assert_eq!(eval_in("(fact 10)", &env), Ok(int(3_628_800)));

    eval_in(
        "(define length (lambda (xs) (if (empty xs) 0 (+ 1 (length (tail xs))))))",
        &env,
    )
    .unwrap();
    assert_eq!(eval_in("(length '(a b c d))", &env), Ok(int(4)));
}

#[test]
fn scoping_is_lexical_not_dynamic() {
    let env = global();
    eval_in("(define y 1)", &env).unwrap();
    eval_in("(define get-y (lambda () y))", &env).unwrap();
    // The caller's binding of y must not leak into get-y.
    assert_eq!(eval_in("((lambda (y) (get-y)) 100)", &env), Ok(int(1)));
}

#[test]
fn closures_remember_their_captured_arguments() {
    let env = global();
    eval_in("(define make-adder (lambda (n) (lambda (x) (+ x n))))", &env).unwrap();
    eval_in("(define add-five (make-adder 5))", &env).unwrap();
    eval_in("(define add-ten (make-adder 10))", &env).unwrap();
    assert_eq!(eval_in("(add-five 1)", &env), Ok(int(6)));
    assert_eq!(eval_in("(add-ten 1)", &env), Ok(int(11)));
}

#[test]
fn arguments_are_evaluated_in_the_callers_environment() {
    let env = global();
    eval_in("(define x 1)", &env).unwrap();
    eval_in("(define id (lambda (x) x))", &env).unwrap();
    assert_eq!(eval_in("((lambda (x) (id (+ x 1))) 41)", &env), Ok(int(42)));
}

#[test]
fn parameters_shadow_globals_inside_the_body_only() {
    let env = global();
    eval_in("(define x 1)", &env).unwrap();
    assert_eq!(eval_in("((lambda (x) x) 2)", &env), Ok(int(2)));
    assert_eq!(eval_in("x", &env), Ok(int(1)));
}

#[test]
fn define_inside_a_call_frame_stays_local() {
    let env = global();
    eval_in(
        "(define f (lambda (a) (if (define local (* a 2)) local 0)))",
        &env,
    )
    .unwrap();
    assert_eq!(eval_in("(f 4)", &env), Ok(int(8)));
    assert_eq!(
        eval_in("local", &env),
        Err(Error::UndefinedSymbol(UndefinedSymbol(LispSymbol::from(
            "local"
        ))))
    );
}

#[test]
fn closure_sees_defines_made_after_its_creation() {
    let env = global();
    eval_in("(define later-user (lambda () later))", &env).unwrap();
    assert!(eval_in("(later-user)", &env).is_err());
    eval_in("(define later 7)", &env).unwrap();
    assert_eq!(eval_in("(later-user)", &env), Ok(int(7)));
}

#[test]
fn closures_compare_equal_to_each_other() {
    let env = global();
    let a = eval_in("(lambda (x) x)", &env).unwrap();
    let b = eval_in("(lambda (p q) (+ p q))", &env).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, int(1));
}

#[test]
fn a_closure_value_evaluates_to_itself() {
    let env = global();
    let closure = eval_in("(lambda () 1)", &env).unwrap();
    assert_eq!(evaluate(&closure, &env), Ok(closure.clone()));
}

#[test]
fn symbol_bound_to_a_non_closure_is_not_callable() {
    let env = global();
    eval_in("(define not-a-fn '(1 2))", &env).unwrap();
    assert_eq!(eval_in("(not-a-fn 1)", &env), Err(Error::NotCallable));
}
