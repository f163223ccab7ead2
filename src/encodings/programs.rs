// Rule modules given to the solver.
//
// Vertices are `or("name")`, `and("name")` or `aux("name")` terms.
// Profiles are strings; signs are 1, -1 and 0.

pub(crate) const CONTRADICTORY_OBS: &str = "\
% mutually exclusive observations of a node
contradiction(E,X,r1) :- obs_vlabel(E,X,1), obs_vlabel(E,X,0).
contradiction(E,X,r2) :- obs_vlabel(E,X,-1), obs_vlabel(E,X,0).
contradiction(E,X,r3) :- obs_vlabel(E,X,-1), obs_vlabel(E,X,1).
contradiction(E,X,r4) :- obs_vlabel(E,X,notMinus), obs_vlabel(E,X,-1).
contradiction(E,X,r5) :- obs_vlabel(E,X,notPlus), obs_vlabel(E,X,1).
% observed variation against the initial level
contradiction(E,X,r6) :- obs_vlabel(E,X,-1), ismin(E,X).
contradiction(E,X,r7) :- obs_vlabel(E,X,1), ismax(E,X).
#show contradiction/3.
";

pub(crate) const GUESS_INPUTS: &str = "\
edge(U,V) :- obs_elabel(U,V,S).
vertex(U) :- edge(U,V).
vertex(V) :- edge(U,V).
has_regulator(V) :- edge(U,V), U != V.
input(V) :- vertex(V), not has_regulator(V).
#show input/1.
";

pub(crate) const SIGN_CONS: &str = "\
sign(1;-1;0).
exp(E) :- obs_vlabel(E,V,S).
exp(E) :- input(E,V).
vertex(V) :- obs_vlabel(E,V,S).
edge(U,V) :- obs_elabel(U,V,S).
vertex(U) :- edge(U,V).
vertex(V) :- edge(U,V).
input(E,V) :- input(V), exp(E).

% each node of each profile increases, decreases or stays unchanged
1 {vlabel(E,V,1); vlabel(E,V,-1); vlabel(E,V,0)} :- vertex(V), exp(E).
1 {elabel(U,V,1); elabel(U,V,-1)} 1 :- edge(U,V), not rep(remedge(U,V,1)), not rep(remedge(U,V,-1)).

% observed edge signs
dual(U,V) :- obs_elabel(U,V,1), obs_elabel(U,V,-1).
elabel(U,V,S) :- obs_elabel(U,V,S), not dual(U,V), not rep(remedge(U,V,S)), not rep(flip(U,V,S)).
elabel(U,V,1) :- dual(U,V), rep(remedge(U,V,-1)), not rep(remedge(U,V,1)).
elabel(U,V,-1) :- dual(U,V), rep(remedge(U,V,1)), not rep(remedge(U,V,-1)).
elabel(U,V,-S) :- rep(flip(U,V,S)).
elabel(U,V,S) :- addedge(U,V,S).

% influences
infl(E,V,S*T) :- elabel(U,V,S), vlabel(E,U,T).
infl(E,V,S) :- rep(new_influence(E,V,S)).

% influences of predecessors with a single label
pinfl(E,V,S*T) :- elabel(U,V,S), vlabel(E,U,T), T != 0, not vlabel(E,U,0), not vlabel(E,U,-T).
pinfl(E,V,S) :- rep(new_influence(E,V,S)).

:- forbidden(E,V,S), vlabel(E,V,S).

% a node at its minimal (resp. maximal) level cannot decrease (resp. increase)
forbidden(E,V,-1) :- ismin(E,V).
forbidden(E,V,1) :- ismax(E,V).
";

pub(crate) const BWD_PROP: &str = "\
% a variation needs an influence of the same sign
forbidden(E,V,1) :- exp(E), vertex(V), not infl(E,V,1), not input(E,V).
forbidden(E,V,-1) :- exp(E), vertex(V), not infl(E,V,-1), not input(E,V).
";

pub(crate) const ONE_STATE: &str = "\
forbidden(E,V,S) :- vlabel(E,V,T), sign(S), S != T.
";

pub(crate) const FWD_PROP: &str = "\
vlabel(E,V,0) :- exp(E), vertex(V), not forbidden(E,V,0).
vlabel(E,V,1) :- infl(E,V,1), not forbidden(E,V,1).
vlabel(E,V,-1) :- infl(E,V,-1), not forbidden(E,V,-1).

% no change of an OR node needs balanced influences
forbidden(E,or(V),0) :- pinfl(E,or(V),1), not infl(E,or(V),-1), not input(E,or(V)), not ismax(E,or(V)).
forbidden(E,or(V),0) :- pinfl(E,or(V),-1), not infl(E,or(V),1), not input(E,or(V)), not ismin(E,or(V)).

% AND nodes
forbidden(E,and(V),0) :- infl(E,and(V),1), not infl(E,and(V),-1), not infl(E,and(V),0), not input(E,and(V)), not ismax(E,and(V)).
forbidden(E,and(V),0) :- infl(E,and(V),-1), not infl(E,and(V),1), not infl(E,and(V),0), not input(E,and(V)), not ismin(E,and(V)).

% influences reaching a node through a path
forbidden(E,or(V),0) :- prinfl(E,or(V),1), not neg_path(E,or(V)), not input(E,or(V)), not ismax(E,or(V)).
forbidden(E,or(V),0) :- prinfl(E,or(V),-1), not pos_path(E,or(V)), not input(E,or(V)), not ismin(E,or(V)).
";

pub(crate) const FOUNDEDNESS: &str = "\
founded(E,X,-1) :- input(E,X).
founded(E,X,1) :- input(E,X).
founded(E,X,S*T) :- founded(E,Y,S), elabel(Y,X,T).
founded(E,X,S) :- vlabel(E,X,S), rep(new_influence(E,X,S)).

forbidden(E,V,1) :- exp(E), vertex(V), not founded(E,V,1).
forbidden(E,V,-1) :- exp(E), vertex(V), not founded(E,V,-1).
";

pub(crate) const ELEM_PATH: &str = "\
#script (python)
import clingo

def member(elem, path):
    while path.type == clingo.SymbolType.Function and path.name == \"conc\" and len(path.arguments) == 2:
        if path.arguments[1] == elem:
            return clingo.Number(1)
        path = path.arguments[0]
    return clingo.Number(1 if path == elem else 0)
#end.

% a new influence acts as an input of its target
input(E,unknownup(E)) :- rep(new_influence(E,X,S)).
vlabel(E,unknownup(E),1) :- rep(new_influence(E,X,S)).
elabel(unknownup(E),X,S) :- rep(new_influence(E,X,S)).

% paths are nested conc(Path,Node) terms, starting from an input
pos_path(E,X,X) :- input(E,X), vlabel(E,X,1), not ismax(E,X).
neg_path(E,X,X) :- input(E,X), vlabel(E,X,-1), not ismin(E,X).
pos_path(E,X,conc(P,X)) :- pos_path(E,Y,P), elabel(Y,X,1), not ismax(E,X), not input(E,X), X != Y, @member(X,P) = 0.
neg_path(E,X,conc(P,X)) :- pos_path(E,Y,P), elabel(Y,X,-1), not ismin(E,X), not input(E,X), X != Y, @member(X,P) = 0.
pos_path(E,X,conc(P,X)) :- neg_path(E,Y,P), elabel(Y,X,-1), not ismax(E,X), not input(E,X), X != Y, @member(X,P) = 0.
neg_path(E,X,conc(P,X)) :- neg_path(E,Y,P), elabel(Y,X,1), not ismin(E,X), not input(E,X), X != Y, @member(X,P) = 0.
pos_path(E,V) :- pos_path(E,V,P).
neg_path(E,V) :- neg_path(E,V,P).

% influences of predecessors lying on the path
prinfl(E,V,1) :- elabel(U,V,1), pos_path(E,V,P), @member(U,P) = 1, vlabel(E,U,1), not vlabel(E,U,0), not vlabel(E,U,-1).
prinfl(E,V,-1) :- elabel(U,V,-1), neg_path(E,V,P), @member(U,P) = 1, vlabel(E,U,1), not vlabel(E,U,0), not vlabel(E,U,-1).
prinfl(E,V,-1) :- elabel(U,V,1), neg_path(E,V,P), @member(U,P) = 1, vlabel(E,U,-1), not vlabel(E,U,0), not vlabel(E,U,1).
prinfl(E,V,1) :- elabel(U,V,-1), pos_path(E,V,P), @member(U,P) = 1, vlabel(E,U,-1), not vlabel(E,U,0), not vlabel(E,U,1).

forbidden(E,V,1) :- exp(E), vertex(V), not pos_path(E,V), not input(E,V).
forbidden(E,V,-1) :- exp(E), vertex(V), not neg_path(E,V), not input(E,V).
";

pub(crate) const SOME_PATH: &str = "\
% a new influence acts as an input of its target
input(E,unknownup(E)) :- rep(new_influence(E,X,S)).
vlabel(E,unknownup(E),1) :- rep(new_influence(E,X,S)).
elabel(unknownup(E),X,S) :- rep(new_influence(E,X,S)).

pos_path(E,X) :- input(E,X), vlabel(E,X,1), not ismax(E,X).
neg_path(E,X) :- input(E,X), vlabel(E,X,-1), not ismin(E,X).
pos_path(E,X) :- pos_path(E,Y), elabel(Y,X,1), not ismax(E,X), not input(E,X).
neg_path(E,X) :- pos_path(E,Y), elabel(Y,X,-1), not ismin(E,X), not input(E,X).
pos_path(E,X) :- neg_path(E,Y), elabel(Y,X,-1), not ismax(E,X), not input(E,X).
neg_path(E,X) :- neg_path(E,Y), elabel(Y,X,1), not ismin(E,X), not input(E,X).

prinfl(E,V,1) :- elabel(U,V,1), pos_path(E,U), vlabel(E,U,1), not vlabel(E,U,0), not vlabel(E,U,-1).
prinfl(E,V,-1) :- elabel(U,V,-1), pos_path(E,U), vlabel(E,U,1), not vlabel(E,U,0), not vlabel(E,U,-1).
prinfl(E,V,-1) :- elabel(U,V,1), neg_path(E,U), vlabel(E,U,-1), not vlabel(E,U,0), not vlabel(E,U,1).
prinfl(E,V,1) :- elabel(U,V,-1), neg_path(E,U), vlabel(E,U,-1), not vlabel(E,U,0), not vlabel(E,U,1).

forbidden(E,V,1) :- exp(E), vertex(V), not pos_path(E,V), not input(E,V).
forbidden(E,V,-1) :- exp(E), vertex(V), not neg_path(E,V), not input(E,V).
";

pub(crate) const ERROR_MEASURE: &str = "\
err(flip(E,X,1)) :- obs_vlabel(E,X,1), not vlabel(E,X,1), vlabel(E,X,0).
err(flip(E,X,2)) :- obs_vlabel(E,X,1), not vlabel(E,X,1), not vlabel(E,X,0), vlabel(E,X,-1).
err(flip(E,X,1)) :- obs_vlabel(E,X,-1), not vlabel(E,X,-1), vlabel(E,X,0).
err(flip(E,X,2)) :- obs_vlabel(E,X,-1), not vlabel(E,X,-1), not vlabel(E,X,0), vlabel(E,X,1).
err(flip(E,X,1)) :- obs_vlabel(E,X,0), not vlabel(E,X,0).
err(flip(E,X,2)) :- obs_vlabel(E,X,notMinus), not vlabel(E,X,0), not vlabel(E,X,1).
err(flip(E,X,2)) :- obs_vlabel(E,X,notPlus), not vlabel(E,X,0), not vlabel(E,X,-1).
";

pub(crate) const MIN_WEIGHTED_ERROR: &str = "\
#minimize{ W@2,E,X : err(flip(E,X,W)) }.
";

pub(crate) const KEEP_INPUTS: &str = "\
forbidden(E,V,T) :- input(E,V), obs_vlabel(E,V,S), sign(S), sign(T), S != T.
forbidden(E,V,1) :- input(E,V), obs_vlabel(E,V,notPlus).
forbidden(E,V,-1) :- input(E,V), obs_vlabel(E,V,notMinus).
";

pub(crate) const KEEP_OBSERVATIONS: &str = "\
forbidden(E,V,T) :- obs_vlabel(E,V,S), sign(S), sign(T), S != T.
forbidden(E,V,1) :- obs_vlabel(E,V,notPlus).
forbidden(E,V,-1) :- obs_vlabel(E,V,notMinus).
";

pub(crate) const ADD_INFLUENCES: &str = "\
{ rep(new_influence(E,or(V),1)); rep(new_influence(E,or(V),-1)) } 1 :- vertex(or(V)), exp(E), not input(E,or(V)).
new_influence(E,V,S) :- rep(new_influence(E,V,S)).
";

pub(crate) const MIN_ADDED_INFLUENCES: &str = "\
#minimize{ 1@2,E,V,S : rep(new_influence(E,V,S)) }.
";

pub(crate) const REMOVE_EDGES: &str = "\
{ rep(remedge(U,V,S)) } :- obs_elabel(U,V,S).
remedge(U,V,S) :- rep(remedge(U,V,S)).
";

pub(crate) const ADD_EDGES: &str = "\
{ addedge(or(U),or(V),1); addedge(or(U),or(V),-1) } 1 :- vertex(or(U)), vertex(or(V)), U != V, not edge(or(U),or(V)).
";

pub(crate) const FLIP_EDGES: &str = "\
{ rep(flip(U,V,S)) } :- obs_elabel(U,V,S), not obs_elabel(U,V,-S).
flip(U,V,S) :- rep(flip(U,V,S)).
";

pub(crate) const MIN_WEIGHTED_REPAIRS: &str = "\
#minimize{ 2@1,add,U,V,S : addedge(U,V,S) }.
#minimize{ 1@1,rem,U,V,S : rep(remedge(U,V,S)) }.
#minimize{ 1@1,flip,U,V,S : rep(flip(U,V,S)) }.
#minimize{ 2@1,trial,V : addeddy(V) }.
";

pub(crate) const BEST_ONE_EDGE: &str = "\
% a trial influence of any sign on at most one OR node
{ addeddy(or(V)) } :- vertex(or(V)).
:- addeddy(U), addeddy(V), U != V.
vertex(aux(\"trial\")).
input(E,aux(\"trial\")) :- exp(E).
elabel(aux(\"trial\"),V,1) :- addeddy(V).
";

pub(crate) const BEST_EDGE_START: &str = "\
% exactly one new edge ending in each edge end, never doubling an edge already added
{ new_edge(or(U),X,1); new_edge(or(U),X,-1) } 1 :- vertex(or(U)), edge_end(X), or(U) != X, not edge(or(U),X), not addedge(or(U),X,1), not addedge(or(U),X,-1).
:- edge_end(X), #count{ U,S : new_edge(U,X,S) } != 1.
elabel(U,V,S) :- new_edge(U,V,S).
#minimize{ 2@1,add,U,V,S : new_edge(U,V,S) }.
#show addedge(U,V,S) : new_edge(U,V,S).
";

pub(crate) const SHOW_ADD_EDGE_END: &str = "\
#show addeddy/1.
";

pub(crate) const SHOW_LABELS: &str = "\
#show vlabel(E,or(V),S) : vlabel(E,or(V),S).
";

pub(crate) const SHOW_ERRORS: &str = "\
flip_node_sign(E,X,1,0) :- obs_vlabel(E,X,1), not vlabel(E,X,1), vlabel(E,X,0).
flip_node_sign(E,X,1,-1) :- obs_vlabel(E,X,1), not vlabel(E,X,1), not vlabel(E,X,0), vlabel(E,X,-1).
flip_node_sign(E,X,-1,0) :- obs_vlabel(E,X,-1), not vlabel(E,X,-1), vlabel(E,X,0).
flip_node_sign(E,X,-1,1) :- obs_vlabel(E,X,-1), not vlabel(E,X,-1), not vlabel(E,X,0), vlabel(E,X,1).
flip_node_sign(E,X,0,1) :- obs_vlabel(E,X,0), not vlabel(E,X,0), vlabel(E,X,1).
flip_node_sign(E,X,0,-1) :- obs_vlabel(E,X,0), not vlabel(E,X,0), vlabel(E,X,-1).
flip_node_sign(E,X,notMinus,-1) :- obs_vlabel(E,X,notMinus), not vlabel(E,X,0), not vlabel(E,X,1).
flip_node_sign(E,X,notPlus,1) :- obs_vlabel(E,X,notPlus), not vlabel(E,X,0), not vlabel(E,X,-1).
#show flip_node_sign/4.
";

pub(crate) const SHOW_REPAIRS: &str = "\
#show remedge/3.
#show addedge/3.
#show new_influence/3.
";

pub(crate) const SHOW_FLIPS: &str = "\
#show flip/3.
";

pub(crate) const PREDICTIONS: &str = "\
pred(E,V,S) :- vlabel(E,V,S).
pred(E,V,notPlus) :- vlabel(E,V,-1).
pred(E,V,notPlus) :- vlabel(E,V,0).
pred(E,V,notMinus) :- vlabel(E,V,1).
pred(E,V,notMinus) :- vlabel(E,V,0).
pred(E,V,change) :- vlabel(E,V,1).
pred(E,V,change) :- vlabel(E,V,-1).
#show pred(E,or(V),S) : pred(E,or(V),S).
";

pub(crate) const PREDICTIONS_DEPMAT: &str = "\
% a node may hold several labels: strong predictions need a single one
pred(E,V,1) :- vlabel(E,V,1), not vlabel(E,V,-1), not vlabel(E,V,0).
pred(E,V,-1) :- vlabel(E,V,-1), not vlabel(E,V,1), not vlabel(E,V,0).
pred(E,V,0) :- vlabel(E,V,0), not vlabel(E,V,1), not vlabel(E,V,-1).
pred(E,V,notPlus) :- exp(E), vertex(V), not vlabel(E,V,1).
pred(E,V,notMinus) :- exp(E), vertex(V), not vlabel(E,V,-1).
pred(E,V,change) :- exp(E), vertex(V), not vlabel(E,V,0).
#show pred(E,or(V),S) : pred(E,or(V),S).
";

pub(crate) const MICS: &str = "\
nonzero(1;-1).
sign(1;-1;0).
exp(E) :- obs_vlabel(E,V,S).
exp(E) :- input(E,V).
vertex(V) :- obs_vlabel(E,V,S).
edge(U,V) :- obs_elabel(U,V,S).
vertex(U) :- edge(U,V).
vertex(V) :- edge(U,V).
input(E,V) :- input(V), exp(E).
dual(U,V) :- obs_elabel(U,V,1), obs_elabel(U,V,-1).

% guess a core, then check that every labeling of the core fails
{ active(V) } :- vertex(V).

vlabel(E,V,1) | vlabel(E,V,-1) | vlabel(E,V,0) :- active(V), exp(E).
elabel(U,V,1) | elabel(U,V,-1) :- edge(U,V), active(U), active(V), not obs_elabel(U,V,1), not obs_elabel(U,V,-1).
elabel(U,V,S) :- obs_elabel(U,V,S), active(U), active(V).

% inactive predecessors may support any variation
nsupp(E,U,V,S) :- edge(U,V), active(U), active(V), vlabel(E,U,0), nonzero(S).
nsupp(E,U,V,S) :- edge(U,V), active(U), active(V), vlabel(E,U,T), T != 0, elabel(U,V,R), R*T != S, nonzero(S), not dual(U,V).
nosupp(E,V,S) :- exp(E), active(V), nonzero(S), nsupp(E,U,V,S) : edge(U,V).

bot :- vlabel(E,V,S), nonzero(S), active(V), not input(E,V), nosupp(E,V,S).
bot :- vlabel(E,V,T), obs_vlabel(E,V,S), sign(S), T != S.
bot :- vlabel(E,V,1), obs_vlabel(E,V,notPlus).
bot :- vlabel(E,V,-1), obs_vlabel(E,V,notMinus).
bot :- vlabel(E,V,-1), ismin(E,V).
bot :- vlabel(E,V,1), ismax(E,V).

vlabel(E,V,S) :- bot, active(V), exp(E), sign(S).
elabel(U,V,S) :- bot, edge(U,V), active(U), active(V), nonzero(S), not obs_elabel(U,V,1), not obs_elabel(U,V,-1).
:- not bot.

#show active/1.
";

pub(crate) const MICS_FWD_PROP: &str = "\
% an unchanged node cannot have a support of one sign only
psupp(E,V,S) :- elabel(U,V,R), vlabel(E,U,T), active(U), active(V), T != 0, S = R*T.
bot :- vlabel(E,V,0), active(V), not input(E,V), psupp(E,V,S), nosupp(E,V,-S).
";
